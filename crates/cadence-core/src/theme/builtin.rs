//! Built-in theme shipped with the application.

use super::{Preset, Theme};
use crate::timer::Step;

/// Everyday routines plus tea-brewing sessions.
pub(super) fn default_theme() -> Theme {
    let mut presets = everyday_presets();
    presets.extend(tea_presets());
    Theme {
        id: "default".into(),
        name: "Everyday & Tea".into(),
        description: "Built-in theme: exercise, brewing and everyday routines".into(),
        usage: "General day-to-day pacing and starter tea sessions".into(),
        file: None,
        presets,
    }
}

fn everyday_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "Pour-over coffee (4 min)",
            vec![
                Step::new("Bloom", 30),
                Step::new("First pour", 60),
                Step::new("Second pour", 60),
                Step::new("Third pour", 60),
                Step::new("Drawdown", 30),
            ],
        ),
        Preset::new(
            "Mobility warm-up (5 min)",
            vec![
                Step::new("Neck and shoulder release", 60),
                Step::new("Arm circles", 60),
                Step::new("Torso twists", 60),
                Step::new("Hip openers", 60),
                Step::new("Knee and ankle rolls", 60),
            ],
        ),
        Preset::new(
            "Pull-up bar (5 sets)",
            vec![
                Step::new("Set 1", 30),
                Step::new("Rest", 60),
                Step::new("Set 2", 30),
                Step::new("Rest", 60),
                Step::new("Set 3", 30),
                Step::new("Rest", 60),
                Step::new("Set 4", 30),
                Step::new("Rest", 60),
                Step::new("Set 5", 30),
            ],
        ),
        Preset::new(
            "Jump rope intervals (8 rounds)",
            vec![
                Step::new("Jump", 45),
                Step::new("Rest", 30),
                Step::new("Jump", 45),
                Step::new("Rest", 30),
                Step::new("Jump", 45),
                Step::new("Rest", 30),
                Step::new("Jump", 45),
                Step::new("Rest", 30),
            ],
        ),
        Preset::new(
            "10-minute desk reset",
            vec![
                Step::new("Sort loose items", 240),
                Step::new("Wipe desk and gear", 180),
                Step::new("Put everything away", 180),
            ],
        ),
        Preset::new(
            "20-minute focus block",
            vec![Step::new("Focused work", 1200)],
        ),
        Preset::new(
            "20-minute reading session",
            vec![
                Step::new("Settle in", 60),
                Step::new("Focused reading", 1020),
                Step::new("Summary and notes", 120),
            ],
        ),
        Preset::new(
            "5-minute breathing break",
            vec![
                Step::new("Settle posture and breath", 60),
                Step::new("Paced breathing, in 4 out 6", 180),
                Step::new("Slow stretch and wind down", 60),
            ],
        ),
        Preset::new(
            "15-minute morning launch",
            vec![
                Step::new("Fresh air and water", 180),
                Step::new("Wake-up stretch", 360),
                Step::new("List today's top three", 360),
            ],
        ),
        Preset::new(
            "30-minute house circuit",
            vec![
                Step::new("Tidy the living area", 600),
                Step::new("Kitchen and table", 600),
                Step::new("Bathroom and floors", 600),
            ],
        ),
        Preset::new(
            "45-minute project sprint",
            vec![
                Step::new("Confirm goal and split work", 300),
                Step::new("Heads-down execution", 2100),
                Step::new("Capture results and notes", 180),
                Step::new("Short stretch break", 120),
            ],
        ),
        Preset::new(
            "60-minute study hour",
            vec![
                Step::new("Warm-up review", 600),
                Step::new("Deep study or practice", 2400),
                Step::new("Recap key points", 600),
            ],
        ),
    ]
}

fn tea_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "Tea master: everyday green tea",
            vec![
                Step::new("Warm the pot and cups", 45),
                Step::new("Add leaves and wake them", 30),
                Step::new("First steep", 60),
                Step::new("Decant and share", 30),
                Step::new("Second steep", 45),
                Step::new("Pour and taste", 45),
            ],
        ),
        Preset::new(
            "Tea master: high-mountain oolong",
            vec![
                Step::new("Warm the pot and cups", 60),
                Step::new("Add leaves and shake the aroma", 45),
                Step::new("Quick first rinse", 25),
                Step::new("Second steep", 50),
                Step::new("Smell and sip", 60),
                Step::new("Third steep", 55),
                Step::new("Share the liquor", 60),
            ],
        ),
        Preset::new(
            "Tea master: black tea",
            vec![
                Step::new("Warm pot and pitcher", 40),
                Step::new("Add leaves, lid on", 35),
                Step::new("First steep", 75),
                Step::new("Decant and taste", 45),
                Step::new("Second steep", 90),
                Step::new("Third steep, lid on", 110),
            ],
        ),
        Preset::new(
            "Tea master: ripe pu-erh",
            vec![
                Step::new("Warm and rinse the pot", 50),
                Step::new("Add leaves and wake them", 40),
                Step::new("Rinse and discard", 20),
                Step::new("First steep", 45),
                Step::new("Second steep", 60),
                Step::new("Third steep", 75),
                Step::new("Fourth steep, slow", 90),
            ],
        ),
        Preset::new(
            "Tea master: jasmine tea",
            vec![
                Step::new("Warm the pot and cups", 45),
                Step::new("Add leaves to unfurl", 30),
                Step::new("First steep", 50),
                Step::new("Decant and share", 35),
                Step::new("Second steep", 55),
                Step::new("Third steep", 65),
            ],
        ),
        Preset::new(
            "Tea master: rose tea",
            vec![
                Step::new("Warm the pot and cups", 40),
                Step::new("Add petals to wake the scent", 35),
                Step::new("Dissolve honey or fruit", 45),
                Step::new("Steep to release aroma", 90),
                Step::new("Pour and taste", 45),
                Step::new("Second steep", 110),
            ],
        ),
        Preset::new(
            "Tea master: iced hibiscus",
            vec![
                Step::new("Rinse the teaware", 30),
                Step::new("Wake the petals in warm water", 45),
                Step::new("Hot steep for color", 120),
                Step::new("Chill over ice", 90),
                Step::new("Sweeten and mix", 60),
                Step::new("Bottle or pour", 60),
            ],
        ),
        Preset::new(
            "Tea master: quick tea bag",
            vec![
                Step::new("Ready hot water and a bag", 30),
                Step::new("Pre-warm the cup", 45),
                Step::new("Steep", 120),
                Step::new("Press lightly and remove", 30),
                Step::new("Season and stir", 45),
            ],
        ),
    ]
}
