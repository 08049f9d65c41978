//! This module aggregates all the command modules for the bot.

/// Quotes and reaction GIFs.
pub mod fun;
/// General purpose commands (help, moving members).
pub mod general;

/// Voice commands (requires the `music` feature).
#[cfg(feature = "music")]
pub mod music;

use crate::Command;

/// Every command the bot knows about.
pub fn all() -> Vec<Command> {
    #[allow(unused_mut)]
    let mut commands = vec![
        general::help::help(),
        general::help::register(),
        general::move_member::move_member(),
        fun::quote::guardarfrase(),
        fun::quote::frase(),
        fun::gif::gif(),
    ];

    #[cfg(feature = "music")]
    {
        use music::{
            clip::*, join::*, leave::*, pause::*, play::*, playing::*, skip::*, stop::*,
            summon::*, volume::*,
        };

        commands.extend(vec![
            join(),
            summon(),
            play(),
            volume(),
            pause(),
            resume(),
            stop(),
            leave(),
            skip(),
            playing(),
            clip(),
        ]);
    }

    commands
}
