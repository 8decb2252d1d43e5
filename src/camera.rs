use crate::surface::Rect;
use crate::surface::Surface;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A monochrome framebuffer rendered as braille characters, 2x4 pixels per character.
pub struct Camera {
    /// The pixel buffer
    pb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        let mut cam = Self {
            pb: Vec::new(),
            fb: String::new(),
            cp: Vec::new(),
            w: 0,
            h: 0,
        };
        cam.realloc(w, h);

        cam
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Size of the rendered frame in terminal `(columns, rows)`
    pub fn char_size(&self) -> (usize, usize) {
        (self.w.div_ceil(2), self.h.div_ceil(4))
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h && self.pb[self.xy_from(x, y)]
    }

    /// Number of lit pixels
    pub fn lit(&self) -> usize {
        self.pb.iter().filter(|&&px| px).count()
    }

    /// Turn every pixel off
    pub fn reset(&mut self) {
        self.pb.fill(false);
    }

    fn realloc(&mut self, w: usize, h: usize) {
        // Every braille character is 3 bytes of UTF-8 and every line ends in a 1 byte newline
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        self.pb = vec![false; w * h];
        self.cp = vec![BRAILLE_EMPTY; bw * bh];
        self.fb = String::with_capacity(3 * (bw * bh) + bh);
        self.w = w;
        self.h = h;
    }

    /// Render the pixel buffer. Every line of the result, including the last, ends in a newline.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.pb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint lies in U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }

        if !self.cp.is_empty() {
            self.fb.push('\n');
        }

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Surface for Camera {
    fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width as usize, height as usize);

        if (w, h) == (self.w, self.h) {
            self.reset();
        } else {
            self.realloc(w, h);
        }
    }

    /// Anything outside the framebuffer is clipped
    fn fill_rect(&mut self, rect: Rect) {
        let x0 = (rect.x as usize).min(self.w);
        let y0 = (rect.y as usize).min(self.h);
        let x1 = (rect.x as usize).saturating_add(rect.w as usize).min(self.w);
        let y1 = (rect.y as usize).saturating_add(rect.h as usize).min(self.h);

        for y in y0..y1 {
            let row = self.xy_from(x0, y);
            self.pb[row..row + (x1 - x0)].fill(true);
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.w as u32, self.h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use crate::surface::Rect;
    use crate::surface::Surface;

    #[test]
    fn blank_frame() {
        let mut cam = Camera::new(4, 4);

        insta::assert_snapshot!(cam.render().trim_end(), @"⠀⠀");
    }

    #[test]
    fn single_pixels_map_to_dots() {
        let mut cam = Camera::new(4, 4);

        cam.fill_rect(Rect::square(0, 0, 1));
        cam.fill_rect(Rect::square(3, 3, 1));

        insta::assert_snapshot!(cam.render().trim_end(), @"⠁⢀");
    }

    #[test]
    fn full_square_is_a_full_cell() {
        let mut cam = Camera::new(4, 4);

        cam.fill_rect(Rect::new(0, 0, 2, 4));

        insta::assert_snapshot!(cam.render().trim_end(), @"⣿⠀");
    }

    #[test]
    fn frame_has_one_line_per_four_rows() {
        let mut cam = Camera::new(256, 128);

        let frame = cam.render();

        assert_eq!(frame.lines().count(), 32);
        assert!(frame.lines().all(|line| line.chars().count() == 128));
        assert_eq!(cam.char_size(), (128, 32));
    }

    #[test]
    fn fill_rect_clips() {
        let mut cam = Camera::new(4, 4);

        cam.fill_rect(Rect::square(3, 3, 10));
        cam.fill_rect(Rect::square(40, 0, 2));

        assert_eq!(cam.lit(), 1);
        assert!(cam.is_lit(3, 3));
        assert!(!cam.is_lit(4, 4));
    }

    #[test]
    fn resize_clears_and_reallocates() {
        let mut cam = Camera::new(4, 4);
        cam.fill_rect(Rect::square(0, 0, 4));

        cam.resize(4, 4);
        assert_eq!(cam.lit(), 0);

        cam.fill_rect(Rect::square(0, 0, 4));
        cam.resize(6, 8);
        assert_eq!(cam.lit(), 0);
        assert_eq!(cam.size(), (6, 8));
        assert_eq!(cam.render().lines().count(), 2);
    }
}
