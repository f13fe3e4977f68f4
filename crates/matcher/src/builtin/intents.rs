//! Default sample phrases for reserved intents

use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUILTIN_SAMPLES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("AMAZON.CancelIntent", &["cancel", "never mind", "forget it"][..]),
        ("AMAZON.HelpIntent", &["help", "help me", "can you help me"][..]),
        ("AMAZON.StopIntent", &["stop", "off", "shut up"][..]),
        ("AMAZON.YesIntent", &["yes", "yeah", "sure"][..]),
        ("AMAZON.NoIntent", &["no", "no thanks"][..]),
        ("AMAZON.PauseIntent", &["pause", "pause that"][..]),
        ("AMAZON.ResumeIntent", &["resume", "continue", "keep going"][..]),
        ("AMAZON.NextIntent", &["next", "skip", "skip forward"][..]),
        ("AMAZON.PreviousIntent", &["go back", "previous", "skip back"][..]),
        ("AMAZON.RepeatIntent", &["repeat", "say that again", "repeat that"][..]),
        ("AMAZON.StartOverIntent", &["start over", "restart", "start again"][..]),
        ("AMAZON.ShuffleOnIntent", &["shuffle", "shuffle on", "shuffle the music"][..]),
        ("AMAZON.ShuffleOffIntent", &["stop shuffling", "shuffle off", "turn off shuffle"][..]),
        ("AMAZON.LoopOnIntent", &["loop", "loop on", "keep repeating this song"][..]),
        ("AMAZON.LoopOffIntent", &["loop off"][..]),
    ])
});

/// Default sample phrases for a reserved intent, if it has any
pub fn builtin_samples(intent: &str) -> Option<&'static [&'static str]> {
    BUILTIN_SAMPLES.get(intent).copied()
}
