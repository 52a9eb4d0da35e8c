//! Feedback phrases shown after a verification attempt.

use rand::Rng;

/// Result a phrase is picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

pub const SUCCESS_PHRASES: [&str; 10] = [
    "You sound perfect! Welcome aboard!",
    "Spot on! Voice verified and you're in!",
    "Hello superstar! You made it! Time to shine!",
    "Your voice unlocks the dashboard! Access granted!",
    "Awesome tone! Voice approved!",
    "Success! Your voiceprint is unique!",
    "Ahoy, Captain! Welcome back to the treasure chest!",
    "That was quick! You're logged in!",
    "Voice match achieved! Proceed to fun!",
    "The system loves your voice! Welcome!",
];

pub const FAILURE_PHRASES: [&str; 10] = [
    "Hmm... try again, superstar! Was that your evil twin?",
    "Voice did not match. Keep going, you'll get it!",
    "Not quite! Are you a secret agent? Try your phrase again.",
    "Almost there! Maybe speak a little louder next time?",
    "Oops! Try to match the recording phrase exactly.",
    "Verification failed. Don't give up!",
    "Sound check failed! Let's hear it one more time.",
    "The voice print is blurry. Please speak clearly.",
    "The microphone caught static. Try re-recording!",
    "Intruder alert! Just kidding. Try the passphrase again.",
];

/// Returns the phrase list for `outcome`.
pub fn phrases(outcome: Outcome) -> &'static [&'static str] {
    match outcome {
        Outcome::Success => &SUCCESS_PHRASES,
        Outcome::Failure => &FAILURE_PHRASES,
    }
}

/// Picks a phrase for `outcome` using the caller's random source.
pub fn pick_phrase<R: Rng + ?Sized>(outcome: Outcome, rng: &mut R) -> &'static str {
    let list = phrases(outcome);
    list[rng.gen_range(0..list.len())]
}
