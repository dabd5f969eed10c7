// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard shortcuts are translated into review [`Command`]s here so the
//! review state never sees raw key events.

use super::Message;
use crate::review::Command;
use crate::ui::review;
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Routes key presses that no widget captured to the review screen.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                command_for_key(&key, modifiers)
                    .map(|command| Message::Review(review::Message::Command(command)))
            }
            _ => None,
        }
    })
}

/// Maps a key press to its review command.
///
/// ←/→ step within the set, ↑ goes to the previous set and ↓ to the next.
/// `A`, `R` and `S` accept, reject and save. Chords with Ctrl, Alt or the
/// logo key are left to the platform.
pub fn command_for_key(key: &Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.control() || modifiers.alt() || modifiers.logo() {
        return None;
    }
    match key {
        Key::Named(Named::ArrowLeft) => Some(Command::MoveLeft),
        Key::Named(Named::ArrowRight) => Some(Command::MoveRight),
        Key::Named(Named::ArrowUp) => Some(Command::PreviousSet),
        Key::Named(Named::ArrowDown) => Some(Command::NextSet),
        Key::Character(c) => match c.to_lowercase().as_str() {
            "a" => Some(Command::Accept),
            "r" => Some(Command::Reject),
            "s" => Some(Command::Save),
            _ => None,
        },
        _ => None,
    }
}

/// Ticks only while there are toasts to expire.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn arrows_map_to_navigation() {
        let none = Modifiers::default();
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowLeft), none),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowRight), none),
            Some(Command::MoveRight)
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowUp), none),
            Some(Command::PreviousSet)
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowDown), none),
            Some(Command::NextSet)
        );
    }

    #[test]
    fn letters_map_to_batch_actions_in_either_case() {
        let none = Modifiers::default();
        assert_eq!(command_for_key(&character("a"), none), Some(Command::Accept));
        assert_eq!(command_for_key(&character("R"), Modifiers::SHIFT), Some(Command::Reject));
        assert_eq!(command_for_key(&character("s"), none), Some(Command::Save));
        assert_eq!(command_for_key(&character("x"), none), None);
    }

    #[test]
    fn platform_chords_are_ignored() {
        assert_eq!(command_for_key(&character("s"), Modifiers::CTRL), None);
        assert_eq!(command_for_key(&character("a"), Modifiers::ALT), None);
        assert_eq!(
            command_for_key(&Key::Named(Named::ArrowLeft), Modifiers::LOGO),
            None
        );
    }
}
