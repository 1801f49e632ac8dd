/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimized window reports 0x0; nothing can be rendered then.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height; 1.0 for an invalid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_aspect_is_one() {
        assert_eq!(Viewport::new(800, 800).aspect(), 1.0);
    }

    #[test]
    fn wide_aspect() {
        assert_eq!(Viewport::new(1600, 900).aspect(), 1600.0 / 900.0);
    }

    #[test]
    fn zero_sized_is_invalid() {
        assert!(!Viewport::new(0, 600).is_valid());
        assert!(!Viewport::new(800, 0).is_valid());
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
    }
}
