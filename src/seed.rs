//! Demo content: an admin account and a 15-question frog knowledge test.

use color_eyre::Result;

use crate::{db::Db, models::ResultForm, names};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEMO_QUIZ_TITLE: &str = "How well do you know frogs? Expert test (15 questions)";

const DEMO_QUIZ_DESCRIPTION: &str = "An expert-level frog test that looks easy and isn't.\n\
    Only correct answers score a point.\n\
    Score 12 or more to pass. Can you become a frog doctor?";

/// Pass mark of the demo quiz.
const PASS_MARK: i64 = 12;

struct SeedQuestion {
    text: &'static str,
    /// The first choice is the correct one.
    choices: &'static [&'static str],
}

const QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        text: "Which taxonomic order do frogs belong to?",
        choices: &["Anura", "Urodela", "Squamata"],
    },
    SeedQuestion {
        text: "Where is the external eardrum (tympanum) of most frogs?",
        choices: &[
            "On the skin just behind the eye",
            "Inside the upper jaw",
            "Near the middle of the back",
        ],
    },
    SeedQuestion {
        text: "Some frogs can turn their stomach inside out to empty it.",
        choices: &["True", "False"],
    },
    SeedQuestion {
        text: "How does the forest green tree frog typically lay its eggs?",
        choices: &[
            "In a foam nest on branches over water, from which tadpoles drop into the water",
            "One hard-shelled egg at a time on the riverbed",
            "On sand dunes, scattered by the wind",
        ],
    },
    SeedQuestion {
        text: "What best describes the digestive tract of a typical tadpole?",
        choices: &[
            "A long gut adapted to a mostly plant-based diet",
            "No stomach at all, digestion happens only in the mouth",
            "A short gut specialised for protein-rich prey",
        ],
    },
    SeedQuestion {
        text: "Which statement about frog teeth is correct?",
        choices: &[
            "Small teeth in the upper jaw, while the lower jaw is usually toothless",
            "Well-developed molars in both jaws",
            "Milk teeth are replaced by permanent teeth",
        ],
    },
    SeedQuestion {
        text: "What is true of the vocal sac of the Japanese tree frog?",
        choices: &[
            "A single sac in the middle of the throat resonates the call",
            "A pair of lateral sacs is the norm",
            "Only females have a vocal sac",
        ],
    },
    SeedQuestion {
        text: "Which mating embrace (amplexus) is most common in frogs?",
        choices: &[
            "Axillary: the male grips the female behind her forelimbs",
            "Inguinal: the male grips the female's waist, by far the most common",
            "Tail amplexus with intertwined tails",
        ],
    },
    SeedQuestion {
        text: "What best describes gas exchange in adult frogs?",
        choices: &[
            "Lungs plus a large share of skin breathing, which grows at low temperatures",
            "Skin breathing disappears completely in adults",
            "Mainly gills, with vestigial lungs",
        ],
    },
    SeedQuestion {
        text: "Where does the Japanese tree frog usually hibernate?",
        choices: &[
            "In gaps on land such as under leaf litter or in soil",
            "Submerged for months at the bottom of deep lakes",
            "Fully aquatic in puddles inside tree hollows",
        ],
    },
    SeedQuestion {
        text: "Which hormone strongly drives tadpole metamorphosis?",
        choices: &["Thyroid hormone (thyroxine, T4)", "Insulin", "Melatonin"],
    },
    SeedQuestion {
        text: "What are the nuptial pads on a male frog's thumbs for?",
        choices: &[
            "Holding the female firmly during amplexus",
            "Secreting venom against predators",
            "Shedding heat to regulate body temperature",
        ],
    },
    SeedQuestion {
        text: "Which introduced frog has become established and a problem across Japan?",
        choices: &[
            "The American bullfrog",
            "The glass frog from Central and South America",
            "The African clawed frog, kept only in labs and never established outdoors",
        ],
    },
    SeedQuestion {
        text: "How do most frogs produce their calls?",
        choices: &[
            "Air is pushed back and forth between lungs and vocal cords and amplified by the vocal sac, so they can call with their mouth shut",
            "Only by vibrating the tongue, they have no vocal cords",
            "By blowing a bony whistle inside the nasal cavity",
        ],
    },
    SeedQuestion {
        text: "Which species is known as one of the largest frogs in the world?",
        choices: &["Goliath frog", "Corroboree frog", "Ornate narrow-mouthed frog"],
    },
];

/// Creates the admin account when missing and replaces the demo quiz.
/// Returns the id of the new demo quiz.
pub async fn seed(db: &Db) -> Result<i64> {
    if db
        .find_admin_by_username(names::DEFAULT_ADMIN_USERNAME)
        .await?
        .is_none()
    {
        db.create_admin_user(names::DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .await?;
    }

    if let Some(old_id) = db.find_quiz_by_title(DEMO_QUIZ_TITLE).await? {
        db.delete_quiz(old_id).await?;
    }

    let quiz_id = db.create_quiz(DEMO_QUIZ_TITLE, DEMO_QUIZ_DESCRIPTION).await?;

    for (order, question) in QUESTIONS.iter().enumerate() {
        let question_id = db
            .insert_question(quiz_id, question.text, order as i64, false)
            .await?;
        for (index, choice) in question.choices.iter().enumerate() {
            let points = if index == 0 { 1 } else { 0 };
            db.create_choice(question_id, choice, points).await?;
        }
    }

    db.create_result(
        quiz_id,
        &ResultForm {
            title: "Passed! Frog doctor".to_string(),
            description: "Congratulations! You cleared a demanding, nerdy test. \
                You are a true frog doctor."
                .to_string(),
            min_total: Some(PASS_MARK),
            max_total: Some(9999),
        },
    )
    .await?;
    db.create_result(
        quiz_id,
        &ResultForm {
            title: "Not yet, keep going".to_string(),
            description: "So close! The expert questions are tough. \
                Review ecology, anatomy and behaviour, then try again."
                .to_string(),
            min_total: Some(-9999),
            max_total: Some(PASS_MARK - 1),
        },
    )
    .await?;

    tracing::info!("seeded demo quiz {quiz_id} with {} questions", QUESTIONS.len());
    Ok(quiz_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_quiz_has_fifteen_answerable_questions() {
        assert_eq!(QUESTIONS.len(), 15);
        assert!(QUESTIONS.iter().all(|q| q.choices.len() >= 2));
        assert!(PASS_MARK <= QUESTIONS.len() as i64);
    }
}
