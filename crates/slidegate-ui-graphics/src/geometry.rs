//! Geometric primitives: Point, Size, Rect

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Same origin, new width. Used when a track reflows horizontally.
    pub fn with_width(&self, width: f32) -> Self {
        Self { width, ..*self }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(10.0, 20.0, 300.0, 40.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(310.0, 60.0));
        assert!(!rect.contains(9.9, 30.0));
        assert!(!rect.contains(150.0, 60.1));
    }

    #[test]
    fn with_width_keeps_origin() {
        let rect = Rect::new(5.0, 6.0, 300.0, 40.0).with_width(200.0);
        assert_eq!(rect, Rect::new(5.0, 6.0, 200.0, 40.0));
        assert_eq!(rect.right(), 205.0);
    }

    #[test]
    fn center_and_translate() {
        let rect = Rect::from_origin_size(Point::new(0.0, 0.0), Size::new(40.0, 20.0));
        assert_eq!(rect.center(), Point::new(20.0, 10.0));
        assert_eq!(rect.translate(5.0, -5.0).center(), Point::new(25.0, 5.0));
    }
}
