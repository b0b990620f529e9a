use rand::SeedableRng;
use rand::rngs::StdRng;
use solace_core::{
    ConversationMessage, EmotionLabel, SupportCatalog, SupportPipeline, TemplateTier,
};
use std::sync::Arc;

const CRISIS_ACTIONS: [&str; 3] = [
    "Get crisis support now",
    "Talk to a professional",
    "I'm in immediate danger",
];

const SAMPLE_UTTERANCES: &[&str] = &[
    "",
    "   ",
    "hello",
    "I went to the store today",
    "I feel anxious and overwhelmed",
    "I'm sad and lonely and so angry at my boss",
    "My father died and I miss him, I'm worried about my family",
    "Work is fine, my partner is fine",
    "Flashbacks and nightmares since the abuse",
    "I feel hopeless",
    "I want to kill myself",
];

fn pipeline() -> SupportPipeline {
    SupportPipeline::bundled().expect("bundled catalog should load")
}

fn history(len: usize) -> Vec<ConversationMessage> {
    (0..len)
        .map(|i| ConversationMessage::user(format!("turn {i}")))
        .collect()
}

#[test]
fn test_distress_phrases_always_produce_crisis_response() {
    let pipeline = pipeline();
    let phrases = pipeline.catalog().crisis.phrases.clone();

    for phrase in phrases {
        for text in [
            phrase.clone(),
            phrase.to_uppercase(),
            format!("I'm anxious and sad... {phrase}!!"),
            format!("({})", phrase.to_uppercase()),
        ] {
            for len in [0, 1, 5, 20] {
                let mut rng = StdRng::seed_from_u64(len as u64);
                let response = pipeline.respond_with(&text, &history(len), &mut rng).unwrap();

                assert!(response.requires_crisis_support, "not gated: {text}");
                assert_eq!(response.text, pipeline.catalog().crisis.message);
                assert_eq!(response.suggested_actions, CRISIS_ACTIONS);
            }
        }
    }
}

#[test]
fn test_kill_myself_scenario() {
    let pipeline = pipeline();
    let response = pipeline.respond("I want to kill myself", &[]).unwrap();

    assert!(response.requires_crisis_support);
    assert_eq!(response.text, pipeline.catalog().crisis.message);
    assert_eq!(response.suggested_actions, CRISIS_ACTIONS);
}

#[test]
fn test_crisis_flag_matches_gate() {
    let pipeline = pipeline();
    for text in SAMPLE_UTTERANCES {
        let response = pipeline.respond(text, &history(4)).unwrap();
        assert_eq!(response.requires_crisis_support, pipeline.gate().is_crisis(text));
    }
}

#[test]
fn test_never_more_than_three_actions() {
    let pipeline = pipeline();
    for (seed, text) in SAMPLE_UTTERANCES.iter().enumerate() {
        for len in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed as u64 * 31 + len as u64);
            let response = pipeline.respond_with(text, &history(len), &mut rng).unwrap();
            assert!(response.suggested_actions.len() <= 3, "{text}");
            assert!(!response.suggested_actions.is_empty(), "{text}");
            assert!(!response.text.is_empty(), "{text}");
        }
    }
}

#[test]
fn test_same_seed_reproduces_response() {
    let pipeline = pipeline();
    for text in SAMPLE_UTTERANCES {
        let first = pipeline
            .respond_with(text, &history(3), &mut StdRng::seed_from_u64(2024))
            .unwrap();
        let second = pipeline
            .respond_with(text, &history(3), &mut StdRng::seed_from_u64(2024))
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_anxiety_and_depression_selects_anxiety_tier() {
    let pipeline = pipeline();
    let text = "I'm nervous and depressed";
    let assessment = pipeline.assess(text);
    assert!(assessment.labels.contains(&EmotionLabel::Anxiety));
    assert!(assessment.labels.contains(&EmotionLabel::Depression));

    for seed in 0..25 {
        let response = pipeline
            .respond_with(text, &[], &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert!(pipeline
            .catalog()
            .responses
            .anxiety
            .iter()
            .any(|t| response.text.starts_with(t.as_str())));
    }
}

#[test]
fn test_empty_history_without_labels_greets() {
    let pipeline = pipeline();
    for seed in 0..10 {
        let response = pipeline
            .respond_with("hi there", &[], &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert!(pipeline.catalog().responses.greeting.contains(&response.text));
        assert_eq!(
            response.suggested_actions,
            vec!["Tell me more", "Coping strategies", "I need encouragement"]
        );
    }
}

#[test]
fn test_reduced_catalog_test_double() {
    let mut catalog = SupportCatalog::bundled().unwrap().as_ref().clone();
    catalog.crisis.phrases = vec!["red alert".into()];
    catalog.responses.anxiety = vec!["ANXIETY".into()];
    catalog.responses.supportive = vec!["SUPPORT".into()];
    catalog.responses.encouragement = vec!["KEEP GOING".into()];
    catalog.policy.anxiety_coping_probability = 0.0;
    catalog.policy.encouragement_probability = 1.0;
    catalog.validate().unwrap();
    let pipeline = SupportPipeline::new(Arc::new(catalog));

    let mut rng = StdRng::seed_from_u64(0);
    assert!(pipeline.respond_with("RED ALERT now", &[], &mut rng).unwrap().requires_crisis_support);
    assert!(!pipeline.respond_with("suicide", &history(5), &mut rng).unwrap().requires_crisis_support);
    assert_eq!(pipeline.respond_with("so anxious", &[], &mut rng).unwrap().text, "ANXIETY");
    assert_eq!(
        pipeline.respond_with("the weather", &history(3), &mut rng).unwrap().text,
        "SUPPORT KEEP GOING"
    );
}

#[test]
fn test_selector_tier_for_each_branch() {
    let pipeline = pipeline();
    let selector = solace_core::ResponseSelector::new(pipeline.catalog());
    let cases = [
        ("I'm furious", TemplateTier::Anger),
        ("we had the funeral", TemplateTier::Grief),
        ("I feel numb", TemplateTier::Depression),
    ];
    for (text, tier) in cases {
        let assessment = pipeline.assess(text);
        let selection = selector
            .select(&history(6), &assessment.labels, assessment.is_crisis, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(selection.tier, tier, "{text}");
    }
}
