/*
 * Hermit, a graphical front end for chess engines
 * Copyright (C) 2024 Jasper Shovelton
 *
 * Hermit is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Hermit is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Hermit. If not, see <https://www.gnu.org/licenses/>.
 */

//! Where auxiliary windows go, and keeping them where they can be grabbed.

/// A coordinate or size the window system should choose.
pub const USE_DEFAULT: i32 = i32::MIN;

/// How far inside the screen the top-left corner of a window must be.
const MIN_VISIBLE: i32 = 32;

/// A rectangle in screen coordinates. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// The x coordinate of the left edge.
    pub left: i32,
    /// The y coordinate of the top edge.
    pub top: i32,
    /// The x coordinate just past the right edge.
    pub right: i32,
    /// The y coordinate just past the bottom edge.
    pub bottom: i32,
}

/// The remembered position and size of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPlacement {
    /// Whether the window was showing.
    pub visible: bool,
    /// The x coordinate of the left edge, or [`USE_DEFAULT`].
    pub x: i32,
    /// The y coordinate of the top edge, or [`USE_DEFAULT`].
    pub y: i32,
    /// The width, or [`USE_DEFAULT`].
    pub width: i32,
    /// The height, or [`USE_DEFAULT`].
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// The width.
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// The height.
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl Default for WindowPlacement {
    /// A visible window the window system places.
    fn default() -> Self {
        Self {
            visible: true,
            x: USE_DEFAULT,
            y: USE_DEFAULT,
            width: USE_DEFAULT,
            height: USE_DEFAULT,
        }
    }
}

impl WindowPlacement {
    /// A visible window at `rect`.
    pub const fn at(rect: Rect) -> Self {
        Self {
            visible: true,
            x: rect.left,
            y: rect.top,
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// Whether any part of the placement is left to the window system.
    pub const fn is_default(&self) -> bool {
        self.x == USE_DEFAULT
            || self.y == USE_DEFAULT
            || self.width == USE_DEFAULT
            || self.height == USE_DEFAULT
    }

    /// The rectangle the window covers, if it is fully known.
    pub const fn rect(&self) -> Option<Rect> {
        if self.is_default() {
            None
        } else {
            Some(Rect::new(self.x, self.y, self.width, self.height))
        }
    }

    /// Moves the window back onto `screen` if its top-left corner is off it
    /// or too close to the right or bottom edge to grab.
    pub fn ensure_on_screen(&mut self, screen: Rect) {
        if self.x == USE_DEFAULT || self.y == USE_DEFAULT {
            return;
        }
        if self.x < screen.left || self.x > screen.right - MIN_VISIBLE {
            self.x = screen.left;
        }
        if self.y < screen.top || self.y > screen.bottom - MIN_VISIBLE {
            self.y = screen.top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, WindowPlacement, USE_DEFAULT};

    #[test]
    fn defaults_are_left_alone() {
        let mut placement = WindowPlacement::default();
        assert!(placement.is_default(), "everything is left to the system");
        assert_eq!(placement.rect(), None, "no known rectangle");

        placement.ensure_on_screen(Rect::new(0, 0, 1920, 1080));
        assert_eq!(placement.x, USE_DEFAULT, "defaults aren't moved on screen");
    }

    #[test]
    fn windows_are_kept_on_screen() {
        let screen = Rect::new(0, 0, 1920, 1080);

        let mut placement = WindowPlacement::at(Rect::new(-50, 1070, 200, 200));
        placement.ensure_on_screen(screen);
        assert_eq!((placement.x, placement.y), (0, 0), "both corners moved");

        let mut placement = WindowPlacement::at(Rect::new(1800, 500, 200, 200));
        placement.ensure_on_screen(screen);
        assert_eq!(
            (placement.x, placement.y),
            (1800, 500),
            "partly visible windows stay put"
        );
    }
}
