//! Palette quantization.
//!
//! Reduces an image's pixels to a small set of representative colours with
//! k-means in CIE Lab space, so "representative" tracks perceived distance
//! rather than raw channel distance. Fully transparent pixels are ignored.

use palette::{IntoColor, Lab, Srgb};

/// Number of representative colours extracted per image by default.
pub const DEFAULT_COLORS_PER_IMAGE: usize = 5;

const MAX_ITERATIONS: usize = 10;

/// Quantize RGBA pixels to at most `k` representative opaque colours.
///
/// Always returns at least one colour for non-empty opaque input: when the
/// image has fewer distinct colours than `k` (a 1x1 or single-colour image),
/// the distinct colours are returned directly. An image with no visible
/// pixels returns an empty set.
pub fn quantize(pixels: &[[u8; 4]], k: usize) -> Vec<[u8; 3]> {
    if k == 0 {
        return Vec::new();
    }

    let visible: Vec<[u8; 3]> = pixels
        .iter()
        .filter(|p| p[3] > 0)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    if visible.is_empty() {
        return Vec::new();
    }

    let mut distinct: Vec<[u8; 3]> = Vec::new();
    for rgb in &visible {
        if !distinct.contains(rgb) {
            distinct.push(*rgb);
        }
        if distinct.len() > k {
            break;
        }
    }
    if distinct.len() <= k {
        return distinct;
    }

    let samples: Vec<Lab> = visible.iter().map(|rgb| to_lab(*rgb)).collect();

    // Seed centroids evenly across the sample sequence
    let mut centroids: Vec<Lab> = (0..k)
        .map(|i| samples[i * samples.len() / k])
        .collect();

    let mut assignments = vec![0usize; samples.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, sample) in samples.iter().enumerate() {
            let nearest = nearest_centroid(*sample, &centroids);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }

        let mut sums = vec![(0.0f32, 0.0f32, 0.0f32, 0usize); k];
        for (i, sample) in samples.iter().enumerate() {
            let (l, a, b, n) = sums[assignments[i]];
            sums[assignments[i]] = (l + sample.l, a + sample.a, b + sample.b, n + 1);
        }
        for (cluster, (l, a, b, n)) in sums.into_iter().enumerate() {
            if n > 0 {
                let n = n as f32;
                centroids[cluster] = Lab::new(l / n, a / n, b / n);
            }
        }

        if !changed {
            break;
        }
    }

    // Report clusters by population, largest first, dropping empty ones
    let mut populations = vec![0usize; k];
    for cluster in &assignments {
        populations[*cluster] += 1;
    }
    let mut ranked: Vec<(usize, usize)> = populations
        .into_iter()
        .enumerate()
        .filter(|(_, n)| *n > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .map(|(cluster, _)| to_rgb(centroids[cluster]))
        .collect()
}

fn to_lab(rgb: [u8; 3]) -> Lab {
    let srgb: Srgb<f32> = Srgb::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    );
    srgb.into_color()
}

fn to_rgb(lab: Lab) -> [u8; 3] {
    let srgb: Srgb<f32> = lab.into_color();
    [
        (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

fn nearest_centroid(sample: Lab, centroids: &[Lab]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let dl = sample.l - centroid.l;
        let da = sample.a - centroid.a;
        let db = sample.b - centroid.b;
        let dist = dl * dl + da * da + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_returns_one_color() {
        let colors = quantize(&[[10, 20, 30, 255]], DEFAULT_COLORS_PER_IMAGE);

        assert_eq!(colors, vec![[10, 20, 30]]);
    }

    #[test]
    fn test_single_color_image() {
        let pixels = vec![[200, 100, 50, 255]; 64];
        let colors = quantize(&pixels, DEFAULT_COLORS_PER_IMAGE);

        assert_eq!(colors, vec![[200, 100, 50]]);
    }

    #[test]
    fn test_fewer_distinct_than_k() {
        let mut pixels = vec![[255, 0, 0, 255]; 10];
        pixels.extend(vec![[0, 0, 255, 255]; 10]);

        let colors = quantize(&pixels, 5);

        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&[255, 0, 0]));
        assert!(colors.contains(&[0, 0, 255]));
    }

    #[test]
    fn test_caps_at_k() {
        // 16 distinct colours quantized down to 5
        let mut pixels = Vec::new();
        for i in 0..16u8 {
            pixels.extend(vec![[i * 16, 255 - i * 16, i * 8, 255]; 4]);
        }

        let colors = quantize(&pixels, 5);

        assert_eq!(colors.len(), 5);
    }

    #[test]
    fn test_transparent_pixels_ignored() {
        let pixels = vec![[255, 0, 0, 0], [0, 255, 0, 0]];

        assert!(quantize(&pixels, 5).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(quantize(&[], 5).is_empty());
        assert!(quantize(&[[1, 2, 3, 255]], 0).is_empty());
    }

    #[test]
    fn test_dominant_colors_survive() {
        // Two heavy clusters and a sprinkle of noise
        let mut pixels = vec![[250, 10, 10, 255]; 100];
        pixels.extend(vec![[10, 10, 250, 255]; 100]);
        for i in 0..8u8 {
            pixels.push([100 + i, 100, 100, 255]);
        }

        let colors = quantize(&pixels, 3);

        // The two dominant clusters must be represented, ranked first
        assert!(colors.len() >= 2);
        let near = |c: [u8; 3], target: [u8; 3]| {
            (c[0] as i32 - target[0] as i32).abs() < 40
                && (c[1] as i32 - target[1] as i32).abs() < 40
                && (c[2] as i32 - target[2] as i32).abs() < 40
        };
        assert!(colors.iter().any(|c| near(*c, [250, 10, 10])));
        assert!(colors.iter().any(|c| near(*c, [10, 10, 250])));
    }
}
