#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]
#![allow(clippy::all)]

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miniaudio_version() {
        unsafe {
            let (mut major, mut minor, mut revision) = (0, 0, 0);
            ma_version(&mut major, &mut minor, &mut revision);
            println!("miniaudio version: {major}.{minor}.{revision}");
            assert_eq!((major, minor), (0, 11));
        }
    }

    #[test]
    fn test_custom_decoder_count() {
        let expected = u32::from(cfg!(feature = "opus")) + u32::from(cfg!(feature = "vorbis"));
        unsafe {
            let mut count = u32::MAX;
            let vtables = soundobj_get_custom_decoders(&mut count);
            assert_eq!(count, expected);
            assert_eq!(vtables.is_null(), expected == 0);
        }
    }
}
