use egui::{Pos2, pos2};

/// A single path command in view-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new contour at the given point
    MoveTo(Pos2),
    /// Straight segment from the current point
    LineTo(Pos2),
}

/// Ordered sequence of path commands.
///
/// A `LineTo` without a preceding `MoveTo` starts at the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Pos2) {
        self.commands.push(PathCommand::LineTo(point));
    }

    /// Drop every command
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// True while the path has no visible segment (a lone anchor counts as empty)
    pub fn is_empty(&self) -> bool {
        !self
            .commands
            .iter()
            .any(|command| matches!(command, PathCommand::LineTo(_)))
    }

    /// Every point the path visits, in order, including anchors
    pub fn points(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.commands.iter().map(|command| match *command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        })
    }

    /// Split into polylines, one per contour that has at least one segment
    pub fn subpaths(&self) -> Vec<Vec<Pos2>> {
        let mut contours: Vec<Vec<Pos2>> = Vec::new();
        let mut current: Vec<Pos2> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if current.len() > 1 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathCommand::LineTo(p) => {
                    if current.is_empty() {
                        current.push(pos2(0.0, 0.0));
                    }
                    current.push(p);
                }
            }
        }
        if current.len() > 1 {
            contours.push(current);
        }

        contours
    }
}
