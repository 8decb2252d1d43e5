/// An axis aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn square(x: u32, y: u32, side: u32) -> Self {
        Self::new(x, y, side, side)
    }
}

/// Something the grid can be painted on.
pub trait Surface {
    /// Set the surface dimensions in pixels. This erases everything previously drawn, even when
    /// the size does not change.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill a rectangle with the foreground color
    fn fill_rect(&mut self, rect: Rect);

    /// Current `(width, height)` in pixels
    fn size(&self) -> (u32, u32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn fill_rect(&mut self, rect: Rect) {
        (**self).fill_rect(rect);
    }

    fn size(&self) -> (u32, u32) {
        (**self).size()
    }
}

/// A surface that remembers every rectangle filled since the last resize
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    width: u32,
    height: u32,
    rects: Vec<Rect>,
    resizes: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles filled since the last resize, in drawing order
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// How many times the surface has been resized (and so cleared)
    pub fn resizes(&self) -> usize {
        self.resizes
    }

    pub fn is_blank(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Surface for Recorder {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rects.clear();
        self.resizes += 1;
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
