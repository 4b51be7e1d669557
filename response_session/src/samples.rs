//! The question sets used when no survey file is provided.

use crate::config::*;

/// Physical commonsense questions. The second option is always the correct one.
pub fn binary_questions() -> Vec<BinaryQuestion> {
    vec![
        BinaryQuestion::new(
            "q1",
            "How to prevent pain while cutting your nails?",
            "Dip your nails inside lukewarm water for 5 minutes before cutting.",
            "Cutting nails doesn't cause pain as nails don't have sensation.",
        )
        .with_correct(OptionChoice::Second),
        BinaryQuestion::new(
            "q2",
            "How to tie pieces of paper together.",
            "Thread ruler through the holes and tie in a bow.",
            "Thread ribbon through the holes and tie in a bow.",
        )
        .with_correct(OptionChoice::Second),
        BinaryQuestion::new(
            "q3",
            "How to remove the membrane from the back of a rack of ribs.",
            "With a dull knife, make a cut at one end of the membrane, then grab it with a paper towel and pull it off like shucking corn",
            "With a sharp knife, make a cut at one end of the membrane, then grab it with a paper towel and pull it off like shucking corn",
        )
        .with_correct(OptionChoice::Second),
        BinaryQuestion::new(
            "q4",
            "Hammer a nail into a piece of wood that will split.",
            "Blunt the head of the nail before pounding into the wood.",
            "Hammer a nail into the wood.",
        )
        .with_correct(OptionChoice::Second),
        BinaryQuestion::new(
            "q5",
            "One seeks to decorate their fire place.",
            "One could put a decorative log in.",
            "One could put a decorative mantle in.",
        )
        .with_correct(OptionChoice::Second),
        BinaryQuestion::new(
            "q6",
            "How to clean kitchen cabinet doors.",
            "Mix vegetable oil and baking soda to form a paste. Use the paste on a toothbrush to clean and shine cabinet doors. Wipe with a wet cloth to remove any residue without taking off the shine.",
            "Mix vegetable oil and baking soda to form a paste. Use the paste on a toothbrush to clean and shine cabinet doors. Wipe with a dry cloth to remove any residue without taking off the shine.",
        )
        .with_correct(OptionChoice::Second),
    ]
}

pub fn ranking_questions() -> Vec<RankingQuestion> {
    vec![
        RankingQuestion::new(
            "r1",
            "Rank these programming languages in order of their performance for server-side applications: (General)",
            &["JavaScript (Node.js)", "Python", "Java", "Go"],
        )
        // Go, Java, Node.js, Python
        .with_correct(&[3, 2, 0, 1]),
        RankingQuestion::new(
            "r2",
            "You accidentally drop a glass cup on a hard tile floor. What is the most likely outcome? (Physical)",
            &[
                "The glass shatters into pieces.",
                "The glass bounces a few times and stays intact.",
                "The glass slowly rolls away without breaking.",
                "The glass remains completely undamaged and stays in place.",
            ],
        )
        .with_correct(&[0, 1, 3, 2]),
        RankingQuestion::new(
            "r3",
            "You are at a friend's birthday party, and they receive a gift they don't like. What is the most appropriate response? (Social)",
            &[
                "Smile and politely say, \"Thank you!\"",
                "Change the topic to avoid making it awkward.",
                "Quietly express disappointment to close friends later.",
                "Complain about the gift in front of everyone.",
            ],
        )
        .with_correct(&[0, 1, 2, 3]),
    ]
}
