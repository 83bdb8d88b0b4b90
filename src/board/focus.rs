//! Focus cursor navigation.
//!
//! Key handling is a pure function of the cursor and the board's shape, so the
//! engine only has to act on the resulting [`KeyAction`].

use serde::{Deserialize, Serialize};

/// The single active selection on the board.
///
/// `task == None` means the column header itself is focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCursor {
    pub column: usize,
    pub task: Option<usize>,
}

impl FocusCursor {
    pub fn new(column: usize, task: Option<usize>) -> Self {
        Self { column, task }
    }

    pub fn column(column: usize) -> Self {
        Self { column, task: None }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FocusKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Delete,
    Backspace,
}

/// Horizontal move direction along the status sequence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Index reached from `from`, or None when it would leave `0..len`
    pub fn step(self, from: usize, len: usize) -> Option<usize> {
        from.checked_add_signed(self.offset()).filter(|&i| i < len)
    }

    /// Index reached from `from`, wrapping around at both ends
    pub fn wrap(self, from: usize, len: usize) -> usize {
        match self {
            Direction::Left if from == 0 => len - 1,
            Direction::Left => from - 1,
            Direction::Right => (from + 1) % len,
        }
    }
}

/// What a key press means for the current cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Ignore,
    Focus(FocusCursor),
    MoveFocused(Direction),
    OpenFocused,
    DeleteFocused,
}

/// Resolve a key press.
///
/// `tasks_in_column` is the task count of the currently focused column.
pub fn resolve_key(
    cursor: FocusCursor,
    column_count: usize,
    tasks_in_column: usize,
    key: FocusKey,
    ctrl: bool,
) -> KeyAction {
    if column_count == 0 {
        return KeyAction::Ignore;
    }

    match key {
        FocusKey::Left | FocusKey::Right => {
            let direction = if key == FocusKey::Left {
                Direction::Left
            } else {
                Direction::Right
            };
            if ctrl && cursor.task.is_some() {
                return KeyAction::MoveFocused(direction);
            }
            KeyAction::Focus(FocusCursor::column(
                direction.wrap(cursor.column, column_count),
            ))
        },
        FocusKey::Down => {
            let task = match (tasks_in_column, cursor.task) {
                (0, _) => None,
                (_, None) => Some(0),
                (n, Some(i)) => Some((i + 1) % n),
            };
            KeyAction::Focus(FocusCursor::new(cursor.column, task))
        },
        FocusKey::Up => {
            let task = match cursor.task {
                Some(i) if i > 0 && tasks_in_column > 0 => Some((i - 1).min(tasks_in_column - 1)),
                _ => None,
            };
            KeyAction::Focus(FocusCursor::new(cursor.column, task))
        },
        FocusKey::Enter => match cursor.task {
            Some(_) => KeyAction::OpenFocused,
            None => KeyAction::Ignore,
        },
        FocusKey::Delete | FocusKey::Backspace => match cursor.task {
            Some(_) if ctrl => KeyAction::DeleteFocused,
            _ => KeyAction::Ignore,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(action: KeyAction) -> FocusCursor {
        match action {
            KeyAction::Focus(cursor) => cursor,
            other => panic!("expected a focus change, got {:?}", other),
        }
    }

    #[test]
    fn test_down_cycles_through_tasks() {
        let mut cursor = FocusCursor::column(0);
        let mut seen = Vec::new();
        for _ in 0..5 {
            cursor = focus(resolve_key(cursor, 3, 3, FocusKey::Down, false));
            seen.push(cursor.task);
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn test_up_from_top_returns_to_column() {
        let cursor = FocusCursor::new(1, Some(0));
        assert_eq!(
            focus(resolve_key(cursor, 3, 3, FocusKey::Up, false)),
            FocusCursor::column(1)
        );

        let cursor = FocusCursor::column(1);
        assert_eq!(
            focus(resolve_key(cursor, 3, 3, FocusKey::Up, false)),
            FocusCursor::column(1)
        );

        let cursor = FocusCursor::new(1, Some(2));
        assert_eq!(
            focus(resolve_key(cursor, 3, 3, FocusKey::Up, false)).task,
            Some(1)
        );
    }

    #[test]
    fn test_vertical_keys_on_empty_column() {
        let cursor = FocusCursor::column(2);
        assert_eq!(
            focus(resolve_key(cursor, 3, 0, FocusKey::Down, false)),
            cursor
        );
        assert_eq!(focus(resolve_key(cursor, 3, 0, FocusKey::Up, false)), cursor);
    }

    #[test]
    fn test_horizontal_wraps_and_resets_task() {
        let cursor = FocusCursor::new(0, Some(1));
        assert_eq!(
            focus(resolve_key(cursor, 5, 2, FocusKey::Left, false)),
            FocusCursor::column(4)
        );
        let cursor = FocusCursor::column(4);
        assert_eq!(
            focus(resolve_key(cursor, 5, 0, FocusKey::Right, false)),
            FocusCursor::column(0)
        );
    }

    #[test]
    fn test_ctrl_horizontal_moves_focused_task() {
        let cursor = FocusCursor::new(1, Some(0));
        assert_eq!(
            resolve_key(cursor, 5, 1, FocusKey::Right, true),
            KeyAction::MoveFocused(Direction::Right)
        );
        assert_eq!(
            resolve_key(cursor, 5, 1, FocusKey::Left, true),
            KeyAction::MoveFocused(Direction::Left)
        );

        // Without a focused task ctrl is just navigation
        let cursor = FocusCursor::column(1);
        assert_eq!(
            focus(resolve_key(cursor, 5, 1, FocusKey::Right, true)),
            FocusCursor::column(2)
        );
    }

    #[test]
    fn test_enter_and_delete() {
        let on_task = FocusCursor::new(0, Some(0));
        let on_column = FocusCursor::column(0);

        assert_eq!(
            resolve_key(on_task, 2, 1, FocusKey::Enter, false),
            KeyAction::OpenFocused
        );
        assert_eq!(
            resolve_key(on_column, 2, 1, FocusKey::Enter, false),
            KeyAction::Ignore
        );
        assert_eq!(
            resolve_key(on_task, 2, 1, FocusKey::Delete, true),
            KeyAction::DeleteFocused
        );
        assert_eq!(
            resolve_key(on_task, 2, 1, FocusKey::Backspace, true),
            KeyAction::DeleteFocused
        );
        assert_eq!(
            resolve_key(on_task, 2, 1, FocusKey::Delete, false),
            KeyAction::Ignore
        );
        assert_eq!(
            resolve_key(on_column, 2, 1, FocusKey::Backspace, true),
            KeyAction::Ignore
        );
    }

    #[test]
    fn test_direction_step_bounds() {
        assert_eq!(Direction::Right.step(1, 3), Some(2));
        assert_eq!(Direction::Right.step(2, 3), None);
        assert_eq!(Direction::Left.step(1, 3), Some(0));
        assert_eq!(Direction::Left.step(0, 3), None);
    }
}
