//! Tests for raster file round-trips and format dispatch

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use wfc::io::image::{load_raster, save_raster};
    use wfc::raster::Raster;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    // Tests a grayscale PNG round-trip keeps bytes and component count
    #[test]
    fn test_png_roundtrip_grayscale() {
        let raster = Raster::from_raw(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        let path = temp_path("wfc_unit_gray.png");

        save_raster(&raster, &path).unwrap();
        let loaded = load_raster(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.component_cnt(), 1);
        assert_eq!(loaded, raster);
    }

    // Tests an RGBA PNG round-trip
    #[test]
    fn test_png_roundtrip_rgba() {
        let raster = Raster::from_raw(
            2,
            1,
            4,
            vec![255, 0, 0, 255, 0, 255, 0, 128],
        )
        .unwrap();
        let path = temp_path("wfc_unit_rgba.png");

        save_raster(&raster, &path).unwrap();
        let loaded = load_raster(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.component_cnt(), 4);
        assert_eq!(loaded, raster);
    }

    // Tests extension dispatch is case-insensitive
    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let raster = Raster::from_raw(1, 1, 3, vec![9, 9, 9]).unwrap();
        let path = temp_path("wfc_unit_upper.PNG");

        save_raster(&raster, &path).unwrap();
        assert!(load_raster(&path).is_ok());
        let _ = std::fs::remove_file(&path);
    }

    // Tests unsupported extensions are rejected up front
    #[test]
    fn test_unknown_extension_is_rejected() {
        let raster = Raster::from_raw(1, 1, 1, vec![0]).unwrap();
        let result = save_raster(&raster, temp_path("wfc_unit_bad.webp"));
        assert!(matches!(result, Err(wfc::WfcError::UnknownFormat { .. })));

        let no_extension = save_raster(&raster, temp_path("wfc_unit_bare"));
        assert!(matches!(
            no_extension,
            Err(wfc::WfcError::UnknownFormat { .. })
        ));
    }

    // Tests a missing input surfaces as a load error
    #[test]
    fn test_missing_input_is_a_load_error() {
        let result = load_raster(temp_path("wfc_unit_does_not_exist.png"));
        assert!(matches!(result, Err(wfc::WfcError::ImageLoad { .. })));
    }
}
