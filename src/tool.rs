use egui::Pos2;
use log::{debug, trace};

use crate::brush::BrushState;
use crate::input::{PointerAction, PointerEvent};
use crate::stroke::{MutableStroke, StrokeRef};

/// Gesture state of the drawing tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

/// Result of feeding one pointer event to the tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Event was not for us; nothing changed
    Ignored,
    /// The in-progress stroke changed
    Updated,
    /// The gesture ended; the stroke (if any) goes on top of the drawing
    Finished(Option<StrokeRef>),
}

impl ToolOutcome {
    pub fn consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Turns pointer gestures into strokes
#[derive(Debug, Clone)]
pub struct DrawStrokeTool {
    state: GestureState,
    // Always present; restamped at every gesture start
    current_stroke: MutableStroke,
    commit_empty_strokes: bool,
}

impl DrawStrokeTool {
    pub fn new(brush: &BrushState, commit_empty_strokes: bool) -> Self {
        Self {
            state: GestureState::Idle,
            current_stroke: MutableStroke::new(brush),
            commit_empty_strokes,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn current_stroke(&self) -> &MutableStroke {
        &self.current_stroke
    }

    pub fn handle_event(&mut self, event: PointerEvent, brush: &BrushState) -> ToolOutcome {
        match (event.action, self.state) {
            (PointerAction::Down, _) => self.on_pointer_down(event.position, brush),
            (PointerAction::Move, GestureState::Drawing) => self.on_pointer_move(event.position),
            (PointerAction::Up | PointerAction::Cancel, GestureState::Drawing) => {
                self.on_pointer_up(brush)
            }
            (PointerAction::Move | PointerAction::Up | PointerAction::Cancel, GestureState::Idle)
            | (PointerAction::Other, _) => {
                trace!("Ignoring {:?} while {:?}", event.action, self.state);
                ToolOutcome::Ignored
            }
        }
    }

    fn on_pointer_down(&mut self, pos: Option<Pos2>, brush: &BrushState) -> ToolOutcome {
        if self.state == GestureState::Drawing {
            debug!("Pointer down during a gesture, restarting the stroke");
        }
        self.current_stroke.restart(brush);
        match pos {
            Some(pos) => self.current_stroke.move_to(pos),
            None => debug!("Pointer down without coordinates, stroke has no anchor"),
        }
        self.state = GestureState::Drawing;
        ToolOutcome::Updated
    }

    fn on_pointer_move(&mut self, pos: Option<Pos2>) -> ToolOutcome {
        match pos {
            Some(pos) => self.current_stroke.line_to(pos),
            None => debug!("Pointer move without coordinates, skipping segment"),
        }
        ToolOutcome::Updated
    }

    fn on_pointer_up(&mut self, brush: &BrushState) -> ToolOutcome {
        self.state = GestureState::Idle;
        let finished = std::mem::replace(&mut self.current_stroke, MutableStroke::new(brush));

        if finished.is_empty() && !self.commit_empty_strokes {
            debug!("Dropping stroke without segments");
            return ToolOutcome::Finished(None);
        }
        ToolOutcome::Finished(Some(finished.into_stroke_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    fn brush(color: &str, thickness: f32) -> BrushState {
        let mut brush = BrushState::default();
        brush.set_color(color).unwrap();
        brush.set_thickness_px(thickness);
        brush
    }

    #[test]
    fn test_full_gesture() {
        let brush = brush("red", 5.0);
        let mut tool = DrawStrokeTool::new(&brush, true);

        assert_eq!(tool.handle_event(PointerEvent::down(1.0, 1.0), &brush), ToolOutcome::Updated);
        assert_eq!(tool.state(), GestureState::Drawing);
        assert!(tool.current_stroke().is_empty());

        assert!(tool.handle_event(PointerEvent::moved(2.0, 1.0), &brush).consumed());
        assert!(!tool.current_stroke().is_empty());

        let ToolOutcome::Finished(Some(stroke)) = tool.handle_event(PointerEvent::up(2.0, 1.0), &brush)
        else {
            panic!("expected a finished stroke");
        };
        assert_eq!(stroke.path().points().collect::<Vec<_>>(), vec![pos2(1.0, 1.0), pos2(2.0, 1.0)]);
        assert_eq!(stroke.color(), Color32::from_rgb(255, 0, 0));
        assert_eq!(tool.state(), GestureState::Idle);
        assert!(tool.current_stroke().path().commands().is_empty());
    }

    #[test]
    fn test_stamp_taken_at_down() {
        let mut brush = brush("red", 5.0);
        let mut tool = DrawStrokeTool::new(&brush, true);
        tool.handle_event(PointerEvent::down(0.0, 0.0), &brush);

        brush.set_color("blue").unwrap();
        brush.set_thickness_px(9.0);
        tool.handle_event(PointerEvent::moved(3.0, 0.0), &brush);
        assert_eq!(tool.current_stroke().color(), Color32::from_rgb(255, 0, 0));

        let ToolOutcome::Finished(Some(stroke)) = tool.handle_event(PointerEvent::up(3.0, 0.0), &brush)
        else {
            panic!("expected a finished stroke");
        };
        assert_eq!(stroke.thickness(), 5.0);
        // The next stroke already carries the new brush
        assert_eq!(tool.current_stroke().thickness(), 9.0);
        assert_eq!(tool.current_stroke().color(), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_cancel_finishes_like_up() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        tool.handle_event(PointerEvent::down(0.0, 0.0), &brush);
        tool.handle_event(PointerEvent::moved(1.0, 1.0), &brush);

        let outcome = tool.handle_event(PointerEvent::new(PointerAction::Cancel, None), &brush);
        assert!(matches!(outcome, ToolOutcome::Finished(Some(_))));
    }

    #[test]
    fn test_idle_ignores_move_and_up() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        assert_eq!(tool.handle_event(PointerEvent::moved(1.0, 1.0), &brush), ToolOutcome::Ignored);
        assert_eq!(tool.handle_event(PointerEvent::up(1.0, 1.0), &brush), ToolOutcome::Ignored);
        assert_eq!(
            tool.handle_event(PointerEvent::at(PointerAction::Other, 1.0, 1.0), &brush),
            ToolOutcome::Ignored
        );
        assert!(tool.current_stroke().path().commands().is_empty());
    }

    #[test]
    fn test_other_is_ignored_mid_gesture() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        tool.handle_event(PointerEvent::down(4.0, 4.0), &brush);
        let before = tool.current_stroke().clone();

        let outcome = tool.handle_event(PointerEvent::at(PointerAction::Other, 9.0, 9.0), &brush);
        assert!(!outcome.consumed());
        assert_eq!(tool.current_stroke(), &before);
        assert_eq!(tool.state(), GestureState::Drawing);
    }

    #[test]
    fn test_tap_commits_empty_stroke_by_default() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        tool.handle_event(PointerEvent::down(4.0, 4.0), &brush);
        let ToolOutcome::Finished(Some(stroke)) = tool.handle_event(PointerEvent::up(4.0, 4.0), &brush)
        else {
            panic!("expected a finished stroke");
        };
        assert!(stroke.path().is_empty());
    }

    #[test]
    fn test_tap_dropped_when_configured() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, false);
        tool.handle_event(PointerEvent::down(4.0, 4.0), &brush);
        assert_eq!(
            tool.handle_event(PointerEvent::up(4.0, 4.0), &brush),
            ToolOutcome::Finished(None)
        );
        assert_eq!(tool.state(), GestureState::Idle);
    }

    #[test]
    fn test_missing_coordinates_skip_geometry() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        assert!(tool.handle_event(PointerEvent::new(PointerAction::Down, None), &brush).consumed());
        assert_eq!(tool.state(), GestureState::Drawing);
        assert!(tool.current_stroke().path().commands().is_empty());

        assert!(tool.handle_event(PointerEvent::new(PointerAction::Move, None), &brush).consumed());
        assert!(tool.current_stroke().path().commands().is_empty());
    }

    #[test]
    fn test_second_down_restarts_gesture() {
        let brush = BrushState::default();
        let mut tool = DrawStrokeTool::new(&brush, true);
        tool.handle_event(PointerEvent::down(0.0, 0.0), &brush);
        tool.handle_event(PointerEvent::moved(5.0, 5.0), &brush);
        tool.handle_event(PointerEvent::down(7.0, 7.0), &brush);

        assert_eq!(tool.current_stroke().path().points().collect::<Vec<_>>(), vec![pos2(7.0, 7.0)]);
        assert_eq!(tool.state(), GestureState::Drawing);
    }
}
