#![no_main]

use libfuzzer_sys::fuzz_target;

// The first byte picks the chunk size, indexing in chunks has to
// agree with indexing everything at once
fuzz_target!(|input: &[u8]| {
    let Some((chunk, data)) = input.split_first() else {
        return;
    };
    let chunk = usize::from(*chunk).max(1);
    let opts = zune_core::options::DecoderOptions::default()
        .set_max_width(1 << 12)
        .set_max_height(1 << 12);

    let mut whole: zune_animgif::GifAnimation =
        zune_animgif::GifAnimation::new_with_options(opts);
    let whole_result = whole.index(data);

    let mut chunked: zune_animgif::GifAnimation =
        zune_animgif::GifAnimation::new_with_options(opts);
    let mut end = 0;
    let mut chunked_result = Ok(());

    while end < data.len() {
        end = (end + chunk).min(data.len());
        chunked_result = chunked.index(&data[..end]);

        if let Err(err) = &chunked_result {
            if !err.is_recoverable() {
                break;
            }
        }
    }
    if whole_result.is_ok() {
        assert!(chunked_result.is_ok());
        assert_eq!(whole.frame_count(), chunked.frame_count());

        for (a, b) in whole.frames().iter().zip(chunked.frames()) {
            assert_eq!(a.offset(), b.offset());
            assert_eq!(a.delay(), b.delay());
            assert_eq!(a.redraw_rect(), b.redraw_rect());
        }
    }
});
