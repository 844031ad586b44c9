mod common;

use common::create_test_db;
use diagnoser::{
    db::Db,
    models::{form_pairs, ResultForm, SelectedChoices},
    services::scoring::ScoringService,
};

async fn quiz_with_bands(db: &Db, bands: &[(&str, Option<i64>, Option<i64>)]) -> i64 {
    let quiz_id = db.create_quiz("Bands", "").await.unwrap();
    for (title, min_total, max_total) in bands {
        db.create_result(
            quiz_id,
            &ResultForm {
                title: title.to_string(),
                description: String::new(),
                min_total: *min_total,
                max_total: *max_total,
            },
        )
        .await
        .unwrap();
    }
    quiz_id
}

#[tokio::test]
async fn aggregate_sums_existing_choices_only() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Points", "").await.unwrap();
    let question_id = db.create_question(quiz_id, "How many?").await.unwrap();
    let five = db.create_choice(question_id, "five", 5).await.unwrap();
    let minus_two = db.create_choice(question_id, "minus two", -2).await.unwrap();
    let svc = ScoringService::new(db.clone());

    assert_eq!(svc.aggregate(&SelectedChoices::default()).await.unwrap(), 0);
    assert_eq!(svc.aggregate(&[five].into_iter().collect()).await.unwrap(), 5);
    assert_eq!(svc.aggregate(&[987_654].into_iter().collect()).await.unwrap(), 0);

    let forward: SelectedChoices = [five, minus_two, 987_654].into_iter().collect();
    let backward: SelectedChoices = [987_654, minus_two, five].into_iter().collect();
    assert_eq!(svc.aggregate(&forward).await.unwrap(), 3);
    assert_eq!(svc.aggregate(&backward).await.unwrap(), 3);
}

#[tokio::test]
async fn resolve_boundary_and_empty_bands() {
    let db = create_test_db().await;
    let quiz_id = quiz_with_bands(&db, &[("fail", None, Some(11)), ("pass", Some(12), None)]).await;
    let svc = ScoringService::new(db.clone());

    let at = |total| {
        let svc = svc.clone();
        async move { svc.resolve(quiz_id, total).await.unwrap().map(|r| r.title) }
    };
    assert_eq!(at(11).await.as_deref(), Some("fail"));
    assert_eq!(at(12).await.as_deref(), Some("pass"));
    assert_eq!(at(i64::MIN).await.as_deref(), Some("fail"));

    let empty = quiz_with_bands(&db, &[]).await;
    assert!(svc.resolve(empty, 12).await.unwrap().is_none());
}

#[tokio::test]
async fn resolve_takes_first_overlapping_band_in_insertion_order() {
    let db = create_test_db().await;
    let quiz_id = quiz_with_bands(&db, &[("A", Some(0), Some(20)), ("B", Some(10), Some(30))]).await;
    let svc = ScoringService::new(db.clone());

    for _ in 0..5 {
        let result = svc.resolve(quiz_id, 15).await.unwrap().expect("resolved");
        assert_eq!(result.title, "A");
    }
    let result = svc.resolve(quiz_id, 25).await.unwrap().expect("resolved");
    assert_eq!(result.title, "B");
}

#[tokio::test]
async fn resolve_ignores_other_quizzes_bands() {
    let db = create_test_db().await;
    let quiz_id = quiz_with_bands(&db, &[("only", Some(100), Some(200))]).await;
    let _other = quiz_with_bands(&db, &[("elsewhere", None, None)]).await;
    let svc = ScoringService::new(db.clone());

    assert!(svc.resolve(quiz_id, 5).await.unwrap().is_none());
}

#[tokio::test]
async fn submitted_form_scores_end_to_end() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Yes or no", "").await.unwrap();
    let question_id = db.create_question(quiz_id, "Pick one").await.unwrap();
    let zero = db.create_choice(question_id, "zero", 0).await.unwrap();
    let one = db.create_choice(question_id, "one", 1).await.unwrap();
    db.create_result(quiz_id, &ResultForm::new("low", "", "-9999", "0"))
        .await
        .unwrap();
    db.create_result(quiz_id, &ResultForm::new("high", "", "1", "9999"))
        .await
        .unwrap();

    let questions = db.questions(quiz_id).await.unwrap();
    let svc = ScoringService::new(db.clone());

    let body = format!("q-{question_id}={one}");
    let selected = SelectedChoices::from_form(&form_pairs(&body), &questions);
    let outcome = svc.score(quiz_id, &selected).await.unwrap();
    assert_eq!(outcome.total, 1);
    assert_eq!(outcome.result.map(|r| r.title).as_deref(), Some("high"));

    let body = format!("q-{question_id}={zero}");
    let selected = SelectedChoices::from_form(&form_pairs(&body), &questions);
    let outcome = svc.score(quiz_id, &selected).await.unwrap();
    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.result.map(|r| r.title).as_deref(), Some("low"));

    // Single-select keeps only the first value.
    let body = format!("q-{question_id}={zero}&q-{question_id}={one}");
    let selected = SelectedChoices::from_form(&form_pairs(&body), &questions);
    assert_eq!(svc.aggregate(&selected).await.unwrap(), 0);
}

#[tokio::test]
async fn multi_select_sums_every_checked_choice() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Many", "").await.unwrap();
    let question_id = db.create_question(quiz_id, "Pick any").await.unwrap();
    db.update_question(question_id, "Pick any", true).await.unwrap();
    let a = db.create_choice(question_id, "a", 2).await.unwrap();
    let b = db.create_choice(question_id, "b", 3).await.unwrap();

    let questions = db.questions(quiz_id).await.unwrap();
    let body = format!("q-{question_id}={a}&q-{question_id}={b}&q-{question_id}=junk&q-{question_id}={a}");
    let selected = SelectedChoices::from_form(&form_pairs(&body), &questions);

    let svc = ScoringService::new(db.clone());
    assert_eq!(svc.aggregate(&selected).await.unwrap(), 5);
}
