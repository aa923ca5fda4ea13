use bevy::math::IVec2;

use crate::{cell::CellBlock, grid::Surface};

/// An RGBA8 pixel buffer the grid is drawn into, copied to the GPU once per presented frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    presented: bool,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: [0, 0, 0, 255].repeat((width * height) as usize),
            presented: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// `None` off the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = ((y * self.width + x) * 4) as usize;
        self.pixels[start..start + 4].try_into().ok()
    }

    /// Returns whether a frame was presented since the last call, and clears the flag.
    #[inline]
    pub fn take_presented(&mut self) -> bool {
        std::mem::take(&mut self.presented)
    }
}

impl Surface for FrameBuffer {
    fn blit(&mut self, origin: IVec2, block: &CellBlock) {
        let size = block.size as i32;
        let x0 = origin.x.max(0);
        let y0 = origin.y.max(0);
        let x1 = (origin.x + size).min(self.width as i32);
        let y1 = (origin.y + size).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let [r, g, b] = block.rgb;
        for y in y0..y1 {
            let row = (y as u32 * self.width) as usize;
            for x in x0..x1 {
                let start = (row + x as usize) * 4;
                self.pixels[start..start + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    fn present(&mut self) {
        self.presented = true;
    }
}

#[cfg(test)]
mod test {
    use bevy::math::{ivec2, uvec2};

    use super::*;
    use crate::{grid::SimGrid, seed::Seed};

    fn block(rgb: [u8; 3], size: u32) -> CellBlock {
        CellBlock { rgb, size }
    }

    #[test]
    fn blit_fills_the_block() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.blit(ivec2(1, 1), &block([10, 20, 30], 2));
        assert_eq!(Some([10, 20, 30, 255]), frame.pixel(1, 1));
        assert_eq!(Some([10, 20, 30, 255]), frame.pixel(2, 2));
        assert_eq!(Some([0, 0, 0, 255]), frame.pixel(0, 0));
        assert_eq!(Some([0, 0, 0, 255]), frame.pixel(3, 3));
        assert_eq!(None, frame.pixel(4, 0));
    }

    #[test]
    fn blit_clips() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.blit(ivec2(-1, 3), &block([1, 2, 3], 2));
        assert_eq!(Some([1, 2, 3, 255]), frame.pixel(0, 3));
        assert_eq!(Some([0, 0, 0, 255]), frame.pixel(1, 3));

        // fully off-canvas, like the border ring
        let before = frame.pixels().to_vec();
        frame.blit(ivec2(-2, -2), &block([9, 9, 9], 2));
        frame.blit(ivec2(4, 0), &block([9, 9, 9], 2));
        assert_eq!(before, frame.pixels());
    }

    #[test]
    fn present_flag_is_taken_once() {
        let mut frame = FrameBuffer::new(1, 1);
        assert!(!frame.take_presented());
        frame.present();
        assert!(frame.take_presented());
        assert!(!frame.take_presented());
    }

    #[test]
    fn grid_render_covers_the_canvas() {
        let mut seed = Seed::dead(3, 2);
        seed.set(uvec2(2, 1), true);
        let grid = SimGrid::new(&seed, 2);
        let mut frame = FrameBuffer::new(6, 4);
        grid.render(&mut frame);
        assert!(frame.take_presented());
        assert_eq!(Some([255, 255, 255, 255]), frame.pixel(4, 2));
        assert_eq!(Some([255, 255, 255, 255]), frame.pixel(5, 3));
        assert_eq!(Some([0, 0, 0, 255]), frame.pixel(3, 3));
        assert_eq!(Some([0, 0, 0, 255]), frame.pixel(0, 0));
    }
}
