#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let opts = zune_core::options::DecoderOptions::default()
        .set_max_width(1 << 12)
        .set_max_height(1 << 12);

    let mut animation: zune_animgif::GifAnimation =
        zune_animgif::GifAnimation::new_with_options(opts);

    let _ = animation.index(data);

    for frame in 0..animation.frame_count_partial() {
        if let Err(err) = animation.decode_frame(data, frame) {
            if !err.is_recoverable() {
                break;
            }
        }
    }
});
