/// Four-character code of the lossless codec downstream video writers use.
/// Frame export in this crate writes PNG sequences and never reads this.
pub const VIDEO_FOURCC: &str = "FFV1";

/// Palette used by [`vis_sequence_depth`](crate::pipeline::visualize_depth::vis_sequence_depth).
pub const DEFAULT_COLORMAP: &str = "inferno";

/// Number of entries in every colormap table (one per 8-bit index).
pub const COLORMAP_SIZE: usize = 256;

/// Decoded frames are resized so both sides are multiples of this.
pub const DIMENSION_MULTIPLE: u32 = 64;

pub const DEFAULT_MAX_RES: u32 = 1024;

/// File extension of exported frames.
pub const FRAME_EXTENSION: &str = "png";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_is_four_characters() {
        assert_eq!(VIDEO_FOURCC.len(), 4);
    }

    #[test]
    fn test_default_max_res_is_aligned() {
        assert_eq!(DEFAULT_MAX_RES % DIMENSION_MULTIPLE, 0);
    }
}
