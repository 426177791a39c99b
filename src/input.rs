use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    if ev.kind == KeyEventKind::Release {
        return None;
    }

    let dir = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Up,
        KeyCode::Char('a') | KeyCode::Left => Left,
        KeyCode::Char('s') | KeyCode::Down => Down,
        KeyCode::Char('d') | KeyCode::Right => Right,
        _ => return None,
    };

    Some(Command::Turn(dir))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers, .. } if modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Turn(Up)));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::Turn(Left)));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::Turn(Down)));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Some(Command::Turn(Right)));
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ev), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(command_for(&key(KeyCode::Esc)), None);
        assert_eq!(command_for(&key(KeyCode::Char('p'))), None);

        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for(&release), None);
    }
}
