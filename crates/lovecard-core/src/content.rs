//! Built-in card content. These are the defaults the configuration falls
//! back to for every section.

use crate::gallery::ReasonItem;
use crate::quiz::QuizQuestion;

pub const TARGET_INSTANT: &str = "2026-12-31T00:00:00";
pub const EXPIRED_MESSAGE: &str = "Time's up!";

pub const PANELS: [&str; 4] = ["letter", "reasons", "quiz", "valentine"];

/// Reaching this step resets the gallery (the reasons panel).
pub const GALLERY_RESET_STEP: usize = 2;

pub const CREDITS_CAPTION: &str = "...and a thousand more reasons I haven't found words for yet";

pub const INITIAL_PROMPT: &str = "Will you be my valentine?";
pub const ACCEPTED_MESSAGE: &str = "Yaaay! I knew you'd say yes ❤️ See you on the 14th!";

pub const ESCALATION_PHRASES: [&str; 4] = [
    "Will you be my valentine?",
    "Are you sure? Think about it...",
    "Really?? The cat is getting sad...",
    "Okay, that button is broken now. Try the other one 💔",
];

pub const ESCALATION_FRAMES: [&str; 4] = [
    "images/cat-hopeful.gif",
    "images/cat-worried.gif",
    "images/cat-crying.gif",
    "images/cat-heartbroken.gif",
];

pub const BACKGROUND_TRACK: &str = "audio/our-song.mp3";
pub const DECLINE_EFFECT: &str = "audio/sad-trombone.mp3";
pub const ACCEPT_EFFECT: &str = "audio/yay.mp3";

pub fn reasons() -> Vec<ReasonItem> {
    [
        ("Your smile", "images/smile.jpg"),
        ("Your laugh", "images/laugh.jpg"),
        ("Your kindness", "images/kindness.jpg"),
        ("Your eyes", "images/eyes.jpg"),
        ("Your hugs", "images/hugs.jpg"),
        ("Your weirdness", "images/weird.jpg"),
    ]
    .into_iter()
    .map(|(label, image)| ReasonItem::new(label, image))
    .collect()
}

pub fn quiz_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            "morning",
            "What do I reach for first in the morning?",
            "Coffee",
            "Tea",
            true,
        ),
        QuizQuestion::new(
            "vacation",
            "Dream vacation: mountains or the sea?",
            "Mountains",
            "The sea",
            false,
        ),
        QuizQuestion::new(
            "movie",
            "Friday movie night: comedy or horror?",
            "Comedy",
            "Horror",
            true,
        ),
        QuizQuestion::new(
            "dinner",
            "Cook together or order in?",
            "Cook together",
            "Order in",
            true,
        ),
        QuizQuestion::new(
            "pet",
            "Which one would I adopt tomorrow?",
            "A dog",
            "A cat",
            false,
        ),
    ]
}

pub fn affirmations() -> Vec<String> {
    AFFIRMATIONS.iter().map(|s| s.to_string()).collect()
}

const AFFIRMATIONS: &[&str] = &[
    "You make ordinary days feel like holidays",
    "You laugh at my worst jokes",
    "You remember the little things",
    "You steal the blanket and I don't even mind",
    "You are my favorite notification",
    "You make coffee taste better",
    "You hold my hand when I'm nervous",
    "You sing in the shower, badly and proudly",
    "You believe in me on the days I don't",
    "You always save me the last bite",
    "You are brave when it matters",
    "You listen, really listen",
    "You make the best playlists",
    "You are kind to waiters",
    "You dance like nobody is watching, even when everybody is",
    "You text me good morning",
    "You make silence comfortable",
    "You call your mom",
    "You know exactly when I need a hug",
    "You never let me give up",
    "You look amazing in my hoodie",
    "You send me memes at 3am",
    "You forgive quickly",
    "You are curious about everything",
    "You make me want to be better",
    "You let me pick the movie (sometimes)",
    "You are terrible at hide and seek",
    "You are my safe place",
    "You make plans and then let me change them",
    "You read to me when I can't sleep",
    "You pet every dog we meet",
    "You cry at cartoons",
    "You make the bed the way I like it",
    "You are honest even when it's hard",
    "You share your fries",
    "You laugh with your whole face",
    "You hum while you cook",
    "You get excited about snow",
    "You are patient with me",
    "You make long drives feel short",
    "You keep my secrets",
    "You bring me soup when I'm sick",
    "You're the first person I want to tell everything",
    "You make the best pancakes",
    "You are stubborn in the cutest way",
    "You hold doors for strangers",
    "You notice when I change my hair",
    "You send voice messages longer than podcasts",
    "You cheer for me louder than anyone",
    "You are the calm in my chaos",
    "You make Mondays bearable",
    "You always know the way home",
    "You have the softest hands",
    "You say sorry first",
    "You love my family",
    "You make me feel at home anywhere",
    "You leave me little notes",
    "You are funny without trying",
    "You make grocery shopping an adventure",
    "You keep the plants alive",
    "You warm your cold feet on me",
    "You are my favorite hello",
    "You are my hardest goodbye",
    "You are gentle with my heart",
    "You know all my coffee orders",
    "You are fearless on roller coasters",
    "You hold me when I cry",
    "You make rainy days cozy",
    "You believe in second chances",
    "You plan the best surprises",
    "You are the reason I smile at my phone",
    "You make every photo better",
    "You let me be myself",
    "You are beautiful when you just woke up",
    "You remember our first date outfit",
    "You are a terrible liar",
    "You share your headphones",
    "You always pick the window seat for me",
    "You make me laugh until I snort",
    "You never judge my snack choices",
    "You fight my monsters with me",
    "You get lost in bookstores",
    "You love the sunset as much as I do",
    "You are my best friend",
    "You make hard things feel possible",
    "You celebrate my small wins",
    "You know my favorite song by heart",
    "You think I'm funny",
    "You make every place feel like ours",
    "You hug like you mean it",
    "You take care of everyone",
    "You light up every room",
    "You stay up late just to talk",
    "You make the future look exciting",
    "You are the best part of my day",
    "You always have a plan B",
    "You make me feel chosen",
    "You understand my weird humor",
    "You never forget to kiss me goodnight",
    "You make winter warm",
    "You make summer sweeter",
    "You make spring bloom brighter",
    "You make autumn cozier",
    "You say my name like a song",
    "You are my favorite adventure",
    "You turned my life into a love story",
    "You are worth every second",
    "You are my person",
    "You make home a feeling, not a place",
    "You are you, and that's everything",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_shape() {
        assert_eq!(affirmations().len(), 110);
        assert_eq!(quiz_questions().len(), 5);
        assert!(!reasons().is_empty());
        assert!(GALLERY_RESET_STEP <= PANELS.len());
        assert_eq!(PANELS[GALLERY_RESET_STEP - 1], "reasons");
    }

    #[test]
    fn each_question_has_exactly_one_match() {
        for q in quiz_questions() {
            assert_eq!(q.options.iter().filter(|o| o.is_match).count(), 1, "{}", q.key);
        }
    }
}
