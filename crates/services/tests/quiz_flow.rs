use std::collections::HashSet;

use quiz_core::model::TableSchema;
use quiz_core::time::fixed_now;
use services::{Clock, QuizPhase, QuizService};
use storage::InMemorySource;

async fn service_for(source: InMemorySource) -> QuizService {
    QuizService::from_source(&source, TableSchema::default(), Clock::fixed(fixed_now()))
        .await
        .expect("load table")
        .with_seed(42)
}

#[tokio::test]
async fn ava_scores_one_out_of_one() {
    let service = service_for(InMemorySource::from_slices(
        &["symbol", "Voicing"],
        &[&[Some("p"), Some("voiceless")]],
    ))
    .await;
    let mut quiz = service.open_session();

    let view = quiz.start_quiz("Ava");
    assert_eq!(
        view.prompt.as_deref(),
        Some("IPA Symbol: p\nWhat is the voicing of this IPA symbol?")
    );

    let view = quiz.submit_answer("Voiceless");
    assert_eq!(view.last_correct, Some(true));
    assert_eq!((view.score, view.trials), (1, 1));

    let view = quiz.quit();
    assert_eq!(view.phase, QuizPhase::Ended);
    let summary = view.summary.expect("summary");
    assert!(summary.contains("Ava"));
    assert!(summary.contains("1/1"));

    let view = quiz.start_quiz("");
    assert_eq!(view.phase, QuizPhase::Idle);
    assert_eq!(
        view.error.as_deref(),
        Some("Please enter your name to start the quiz.")
    );
}

#[tokio::test]
async fn fourth_question_from_three_rows_is_exhausted() {
    let service = service_for(InMemorySource::from_slices(
        &["symbol", "Voicing", "Place", "Centrality", "Oro-nasal", "Manner"],
        &[
            &[Some("p"), Some("voiceless"), Some("bilabial"), None, Some("oral"), Some("plosive")],
            &[Some("n"), Some("voiced"), Some("alveolar"), None, Some("nasal"), Some("nasal")],
            &[Some("ɨ"), None, None, Some("central"), Some("oral"), None],
            &[None, Some("voiced"), Some("velar"), None, None, None],
            &[Some("?"), None, None, None, None, None],
        ],
    ))
    .await;
    let mut quiz = service.open_session();

    let mut asked = HashSet::new();
    let view = quiz.start_quiz("Ava");
    assert!(asked.insert(view.prompt.expect("prompt")));
    for _ in 0..2 {
        quiz.submit_answer("guess");
        let view = quiz.next_question();
        assert!(view.error.is_none());
        assert!(asked.insert(view.prompt.expect("prompt")));
    }

    let view = quiz.submit_answer("guess");
    assert!(!view.can_advance);
    let view = quiz.next_question();
    assert_eq!(view.phase, QuizPhase::Graded);
    assert!(view.error.is_some());
    assert!(quiz.last_error().expect("error").is_exhausted());
    assert_eq!(view.trials, 3);

    let view = quiz.quit();
    assert_eq!(view.phase, QuizPhase::Ended);
    assert_eq!(view.symbols_asked, Some(3));
    assert_eq!(view.elapsed_secs, Some(0));
    assert_eq!(quiz.view().phase, QuizPhase::Idle);
}

#[tokio::test]
async fn score_never_exceeds_trials() {
    let headers = ["symbol", "Voicing"];
    let symbols: Vec<String> = (0..20).map(|i| format!("s{i}")).collect();
    let rows: Vec<Vec<Option<&str>>> = symbols
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let voicing = if i % 2 == 0 { "Voiced" } else { "Voiceless" };
            vec![Some(s.as_str()), Some(voicing)]
        })
        .collect();
    let row_refs: Vec<&[Option<&str>]> = rows.iter().map(Vec::as_slice).collect();
    let service = service_for(InMemorySource::from_slices(&headers, &row_refs)).await;
    let mut quiz = service.open_session();

    quiz.start_quiz("Ava");
    let mut submitted = 0;
    loop {
        let guess = if submitted % 3 == 0 { " VOICED " } else { "voiceless" };
        let view = quiz.submit_answer(guess);
        submitted += 1;
        assert_eq!(view.trials, submitted);
        assert!(view.score <= view.trials);

        let view = quiz.next_question();
        if view.error.is_some() {
            break;
        }
    }
    assert_eq!(submitted, 20);
    assert_eq!(quiz.session().used_symbols().len(), 20);
}

#[tokio::test]
async fn missing_symbol_column_is_fatal() {
    let source = InMemorySource::from_slices(&["IPA", "Voicing"], &[&[Some("p"), Some("voiceless")]]);
    let err = QuizService::from_source(&source, TableSchema::default(), Clock::system())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "the required \"symbol\" column is missing from the data"
    );
}
