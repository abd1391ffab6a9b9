use game_core::{BonusRegistry, LexiconOracle, Relation, ScoreRequest, score_word, string_to_letters};
use runtime::{MemoryLexicon, World};

fn lexicon() -> MemoryLexicon {
    let content = game_content::Content::embedded().unwrap();
    MemoryLexicon::from_spec(&content.lexicon)
}

#[tokio::test]
async fn cat_against_a_fauna_weakness_scores_ten() {
    let lexicon = lexicon();
    assert!(
        lexicon
            .related(Relation::Hypernym, "fauna", "cat")
            .await
            .unwrap()
    );

    let placed = string_to_letters("cat", 0);
    let weaknesses = vec!["fauna".to_owned()];
    let sheet = score_word(
        &lexicon,
        &BonusRegistry::new(),
        ScoreRequest {
            placed: &placed,
            weaknesses: &weaknesses,
            ..ScoreRequest::default()
        },
    )
    .await
    .unwrap();

    assert!(sheet.ok());
    assert_eq!(sheet.score(), 10);
}

#[tokio::test]
async fn words_outside_the_lexicon_score_nothing() {
    let lexicon = lexicon();
    let placed = string_to_letters("qzx", 0);
    let sheet = score_word(&lexicon, &BonusRegistry::new(), ScoreRequest {
        placed: &placed,
        ..ScoreRequest::default()
    })
    .await
    .unwrap();

    assert!(!sheet.ok());
    assert_eq!(sheet.score(), 0);
}

#[test]
fn embedded_world_exposes_its_content() {
    let world = World::embedded().unwrap();
    assert_eq!(world.config().start_region, "meadow");
    assert!(world.catalog().region("meadow").is_some());
    assert!(!world.catalog().opponents.is_empty());
}
