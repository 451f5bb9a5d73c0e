//! Export service: serialize the active chart to a PNG file.

use std::path::Path;

use image::ImageEncoder;

use crate::error::{ChartError, Result};
use crate::render::ChartArtifact;

/// Write the chart to `destination` as a PNG.
///
/// Callers pass `session.current()`; an empty session fails with
/// `NoArtifact` before anything touches the filesystem.
pub fn export(artifact: Option<&ChartArtifact>, destination: &Path) -> Result<()> {
    let artifact = artifact.ok_or(ChartError::NoArtifact)?;
    let png = encode_png(artifact)?;
    std::fs::write(destination, &png).map_err(|e| ChartError::io(destination, e))?;
    log::info!("exported chart to {}", destination.display());
    Ok(())
}

/// Encode the artifact's pixel buffer as PNG bytes.
pub fn encode_png(artifact: &ChartArtifact) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
    encoder
        .write_image(
            artifact.pixels(),
            artifact.width(),
            artifact.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| ChartError::Render(format!("failed to encode PNG: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_spec::{ChartKind, ChartSpec};
    use crate::dataset::Dataset;
    use crate::RenderOptions;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn artifact() -> ChartArtifact {
        let ds = Dataset::from_rows(
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["1".to_string(), "4".to_string()],
                vec!["2".to_string(), "5".to_string()],
            ],
        )
        .unwrap();
        let spec = ChartSpec::new(ChartKind::Line, "A", "B", &ds).unwrap();
        crate::render::render(
            &spec,
            &ds,
            &RenderOptions {
                width: 200,
                height: 150,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_export_without_artifact() {
        let dest = std::env::temp_dir().join("chartdash_no_artifact.png");
        let _ = std::fs::remove_file(&dest);

        let result = export(None, &dest);
        assert!(matches!(result, Err(ChartError::NoArtifact)));
        // Nothing may be written when there is no chart.
        assert!(!dest.exists());
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let png = encode_png(&artifact()).unwrap();
        assert!(png.len() > 8);
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_export_writes_png_file() {
        let chart = artifact();
        let dest = std::env::temp_dir().join("chartdash_export_test.png");

        export(Some(&chart), &dest).unwrap();
        let written = std::fs::read(&dest).unwrap();
        assert_eq!(&written[0..8], &PNG_MAGIC);

        let _ = std::fs::remove_file(&dest);
    }

    #[test]
    fn test_export_unwritable_destination() {
        let chart = artifact();
        let dest = Path::new("/no/such/directory/chart.png");
        let result = export(Some(&chart), dest);
        assert!(matches!(result, Err(ChartError::Io { .. })));
    }
}
