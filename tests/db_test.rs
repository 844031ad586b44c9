mod common;

use common::create_test_db;
use diagnoser::{
    db::Db,
    models::{ChoiceMode, ChoiceStyle, DisplayMode, MoveDirection, QuizSettings, ResultForm},
    seed,
};

async fn question_ids(db: &Db, quiz_id: i64) -> Vec<i64> {
    db.questions(quiz_id)
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect()
}

#[tokio::test]
async fn create_and_update_quiz() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Frogs", "About frogs").await.unwrap();

    let quiz = db.get_quiz(quiz_id).await.unwrap().expect("quiz exists");
    assert_eq!(quiz.title, "Frogs");
    assert_eq!(quiz.display_mode, "ordered");
    assert_eq!(quiz.choice_style, "normal");

    db.update_quiz(
        quiz_id,
        &QuizSettings {
            title: "Toads".to_string(),
            description: String::new(),
            display_mode: DisplayMode::Random,
            choice_mode: ChoiceMode::Random,
            choice_style: ChoiceStyle::Heart,
        },
    )
    .await
    .unwrap();
    db.set_quiz_image(quiz_id, Some("/uploads/toad_1_abcdefgh.png"))
        .await
        .unwrap();

    let quiz = db.get_quiz(quiz_id).await.unwrap().expect("quiz exists");
    assert_eq!(quiz.title, "Toads");
    assert_eq!(quiz.display_mode, "random");
    assert_eq!(quiz.choice_mode, "random");
    assert_eq!(quiz.choice_style, "heart");
    assert_eq!(quiz.image_url.as_deref(), Some("/uploads/toad_1_abcdefgh.png"));

    db.set_quiz_image(quiz_id, None).await.unwrap();
    assert_eq!(db.get_quiz(quiz_id).await.unwrap().unwrap().image_url, None);
}

#[tokio::test]
async fn quiz_list_counts_questions() {
    let db = create_test_db().await;
    let first = db.create_quiz("First", "").await.unwrap();
    let second = db.create_quiz("Second", "").await.unwrap();
    db.create_question(second, "a").await.unwrap();
    db.create_question(second, "b").await.unwrap();

    let quizzes = db.quizzes().await.unwrap();
    assert_eq!(quizzes.len(), 2);
    assert_eq!((quizzes[0].id, quizzes[0].question_count), (first, 0));
    assert_eq!((quizzes[1].id, quizzes[1].question_count), (second, 2));
}

#[tokio::test]
async fn questions_append_in_order() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Q", "").await.unwrap();
    let a = db.create_question(quiz_id, "a").await.unwrap();
    let b = db.create_question(quiz_id, "b").await.unwrap();
    let c = db.create_question(quiz_id, "c").await.unwrap();

    let orders: Vec<i64> = db
        .questions(quiz_id)
        .await
        .unwrap()
        .iter()
        .map(|q| q.order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(question_ids(&db, quiz_id).await, vec![a, b, c]);
}

#[tokio::test]
async fn move_question_swaps_and_stops_at_edges() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Q", "").await.unwrap();
    // Equal orders are tie-broken by id, then renumbered on the first move.
    let a = db.insert_question(quiz_id, "a", 5, false).await.unwrap();
    let b = db.insert_question(quiz_id, "b", 5, false).await.unwrap();
    let c = db.insert_question(quiz_id, "c", 9, false).await.unwrap();

    db.move_question(quiz_id, c, MoveDirection::Up).await.unwrap();
    assert_eq!(question_ids(&db, quiz_id).await, vec![a, c, b]);

    db.move_question(quiz_id, a, MoveDirection::Up).await.unwrap();
    assert_eq!(question_ids(&db, quiz_id).await, vec![a, c, b]);

    db.move_question(quiz_id, b, MoveDirection::Down).await.unwrap();
    assert_eq!(question_ids(&db, quiz_id).await, vec![a, c, b]);

    let orders: Vec<i64> = db
        .questions(quiz_id)
        .await
        .unwrap()
        .iter()
        .map(|q| q.order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn choices_update_text_only_when_given() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Q", "").await.unwrap();
    let question_id = db.create_question(quiz_id, "q").await.unwrap();
    let choice_id = db.create_choice(question_id, "yes", 1).await.unwrap();

    db.update_choice(choice_id, None, 4).await.unwrap();
    let choice = db.get_choice(choice_id).await.unwrap().expect("choice");
    assert_eq!((choice.text.as_str(), choice.sum_points), ("yes", 4));

    db.update_choice(choice_id, Some("no"), -1).await.unwrap();
    let choice = db.get_choice(choice_id).await.unwrap().expect("choice");
    assert_eq!((choice.text.as_str(), choice.sum_points), ("no", -1));

    db.delete_choice(choice_id).await.unwrap();
    assert!(db.get_choice(choice_id).await.unwrap().is_none());
}

#[tokio::test]
async fn results_keep_unset_bounds() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Q", "").await.unwrap();
    let result_id = db
        .create_result(quiz_id, &ResultForm::new("open", "", "", "abc"))
        .await
        .unwrap();

    let result = db.get_result(result_id).await.unwrap().expect("result");
    assert_eq!((result.min_total, result.max_total), (None, None));

    db.update_result(result_id, &ResultForm::new("closed", "d", "1", "2"))
        .await
        .unwrap();
    let result = db.get_result(result_id).await.unwrap().expect("result");
    assert_eq!(result.title, "closed");
    assert_eq!((result.min_total, result.max_total), (Some(1), Some(2)));

    db.delete_result(result_id).await.unwrap();
    assert!(db.results(quiz_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_quiz_removes_everything_it_owns() {
    let db = create_test_db().await;
    let quiz_id = db.create_quiz("Doomed", "").await.unwrap();
    let question_id = db.create_question(quiz_id, "q").await.unwrap();
    let choice_id = db.create_choice(question_id, "c", 1).await.unwrap();
    db.create_result(quiz_id, &ResultForm::new("r", "", "", ""))
        .await
        .unwrap();
    let keep = db.create_quiz("Kept", "").await.unwrap();
    db.create_question(keep, "stays").await.unwrap();

    db.delete_quiz(quiz_id).await.unwrap();

    assert!(db.get_quiz(quiz_id).await.unwrap().is_none());
    assert!(db.get_question(question_id).await.unwrap().is_none());
    assert!(db.get_choice(choice_id).await.unwrap().is_none());
    assert!(db.results(quiz_id).await.unwrap().is_empty());
    assert_eq!(db.questions(keep).await.unwrap().len(), 1);
}

#[tokio::test]
async fn admin_sessions_round_trip() {
    let db = create_test_db().await;
    let user_id = db.create_admin_user("admin", "admin123").await.unwrap();

    assert!(db.verify_admin_password("admin", "wrong").await.unwrap().is_none());
    let user = db
        .verify_admin_password("admin", "admin123")
        .await
        .unwrap()
        .expect("password accepted");
    assert_eq!(user.id, user_id);

    let session = db.create_admin_session(user_id).await.unwrap();
    let found = db.admin_session_user(&session).await.unwrap().expect("session");
    assert_eq!(found.username, "admin");

    db.delete_admin_session(&session).await.unwrap();
    assert!(db.admin_session_user(&session).await.unwrap().is_none());
}

#[tokio::test]
async fn admin_password_reset_needs_existing_user() {
    let db = create_test_db().await;
    assert!(!db.set_admin_password("admin", "x").await.unwrap());

    db.create_admin_user("admin", "old").await.unwrap();
    assert!(db.set_admin_password("admin", "new").await.unwrap());
    assert!(db.verify_admin_password("admin", "old").await.unwrap().is_none());
    assert!(db.verify_admin_password("admin", "new").await.unwrap().is_some());
}

#[tokio::test]
async fn seed_replaces_demo_quiz() {
    let db = create_test_db().await;

    seed::seed(&db).await.unwrap();
    let second = seed::seed(&db).await.unwrap();

    let quizzes = db.quizzes().await.unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].question_count, 15);

    let results = db.results(second).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!((results[0].min_total, results[0].max_total), (Some(12), Some(9999)));
    assert_eq!((results[1].min_total, results[1].max_total), (Some(-9999), Some(11)));

    assert!(db
        .verify_admin_password("admin", seed::DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap()
        .is_some());
}
