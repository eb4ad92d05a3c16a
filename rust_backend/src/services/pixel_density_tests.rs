#[cfg(test)]
mod tests {
    use crate::core::domain::{CoordinateBatch, SkyCoordinate};
    use crate::error::SkyPixError;
    use crate::healpix::{Nside, PixelScheme};
    use crate::services::pixel_density::{
        compute_pixel_density, compute_pixel_density_map, count_pixel_occupancy, get_ppix,
        DensityOptions,
    };

    fn batch(points: &[(f64, f64)]) -> CoordinateBatch {
        points
            .iter()
            .map(|&(ra, dec)| SkyCoordinate::from_degrees(ra, dec))
            .collect()
    }

    fn density(points: &[(f64, f64)], nside: i64) -> Vec<usize> {
        compute_pixel_density(
            &batch(points),
            Nside::new(nside).unwrap(),
            &DensityOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_point_is_alone() {
        assert_eq!(density(&[(10.0, 20.0)], 1024), vec![1]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(density(&[(10.0, 20.0), (10.0, 20.0)], 1024), vec![2, 2]);
    }

    #[test]
    fn test_near_pole_points_share_coarse_cell() {
        // both inside the first north polar cell (0° <= RA < 90°) at nside 1
        assert_eq!(density(&[(10.0, 89.999), (80.0, 89.999)], 1), vec![2, 2]);
        // opposite sides of the pole sit in different polar cells
        assert_eq!(density(&[(0.0, 89.999), (180.0, 89.999)], 1), vec![1, 1]);
    }

    #[test]
    fn test_north_pole_is_valid() {
        assert_eq!(density(&[(0.0, 90.0), (45.0, 90.0)], 1024), vec![2, 2]);
        // four cells meet at the pole, split by RA quadrant
        assert_eq!(density(&[(0.0, 90.0), (123.0, 90.0)], 1024), vec![1, 1]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(density(&[], 1024).is_empty());
        assert!(get_ppix(&[], &[], 64).unwrap().is_empty());
    }

    #[test]
    fn test_distinct_cells_are_all_ones() {
        let points = [(0.0, 0.0), (90.0, 0.0), (180.0, 45.0), (270.0, -45.0)];
        assert_eq!(density(&points, 1024), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_single_cell_gives_batch_size() {
        let points: Vec<(f64, f64)> = (0..7).map(|i| (90.0 + i as f64 * 0.01, 0.0)).collect();
        assert_eq!(density(&points, 1), vec![7; 7]);
    }

    #[test]
    fn test_output_aligned_with_input() {
        let points = [(10.0, 20.0), (200.0, -30.0), (10.0, 20.0), (10.0, 20.0)];
        assert_eq!(density(&points, 1024), vec![3, 1, 3, 3]);
    }

    #[test]
    fn test_density_map_summary() {
        let points = [(10.0, 20.0), (200.0, -30.0), (10.0, 20.0)];
        let map = compute_pixel_density_map(
            &batch(&points),
            Nside::new(1024).unwrap(),
            &DensityOptions::default().with_scheme(PixelScheme::Nested),
        )
        .unwrap();

        assert_eq!(map.pixels.len(), 3);
        assert_eq!(map.pixels[0], map.pixels[2]);
        assert_eq!(map.pixels[0], 5085024);
        assert_eq!(map.distinct_pixels, 2);
        assert_eq!(map.max_density, 2);
        assert_eq!(map.scheme, PixelScheme::Nested);
    }

    #[test]
    fn test_count_pixel_occupancy() {
        let counts = count_pixel_occupancy(&[5, 3, 5, 5, 9]);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&5], 3);
        assert_eq!(counts[&3], 1);
        assert_eq!(counts[&9], 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let points: CoordinateBatch = (0..10_000)
            .map(|i| {
                let ra = (i as f64 * 7.31) % 360.0;
                let dec = ((i as f64 * 3.17) % 180.0) - 90.0;
                SkyCoordinate::from_degrees(ra, dec)
            })
            .collect();
        let nside = Nside::new(8).unwrap();

        let parallel = compute_pixel_density(
            &points,
            nside,
            &DensityOptions {
                scheme: PixelScheme::Ring,
                parallel_threshold: 1,
            },
        )
        .unwrap();
        let sequential =
            compute_pixel_density(&points, nside, &DensityOptions::default().sequential()).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = get_ppix(&[10.0, f64::NAN], &[20.0, 0.0], 1024);
        assert!(matches!(result, Err(SkyPixError::NumericError(_))));

        let result = get_ppix(&[10.0], &[f64::NEG_INFINITY], 1024);
        assert!(matches!(result, Err(SkyPixError::NumericError(_))));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            get_ppix(&[10.0], &[20.0], 0),
            Err(SkyPixError::InvalidArgument(_))
        ));
        assert!(matches!(
            get_ppix(&[10.0], &[20.0], -1),
            Err(SkyPixError::InvalidArgument(_))
        ));
        assert!(matches!(
            get_ppix(&[10.0, 11.0], &[20.0], 1024),
            Err(SkyPixError::InvalidArgument(_))
        ));
        // declination past the pole gives theta outside [0, pi]
        assert!(matches!(
            get_ppix(&[10.0], &[95.0], 1024),
            Err(SkyPixError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_nested_needs_power_of_two() {
        let result = compute_pixel_density(
            &batch(&[(10.0, 20.0)]),
            Nside::new(1000).unwrap(),
            &DensityOptions::default().with_scheme(PixelScheme::Nested),
        );
        assert!(matches!(result, Err(SkyPixError::InvalidArgument(_))));
    }

    #[test]
    fn test_out_of_range_ra_is_accepted() {
        // RA beyond 360 is not normalized by the converter but still indexes
        // the same cell as its wrapped value
        assert_eq!(density(&[(370.0, 20.0), (10.0, 20.0)], 1024), vec![2, 2]);
    }
}
