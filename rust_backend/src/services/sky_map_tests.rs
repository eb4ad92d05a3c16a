#[cfg(test)]
mod tests {
    use crate::core::domain::CoordinateBatch;
    use crate::error::SkyPixError;
    use crate::healpix::Nside;
    use crate::services::pixel_density::DensityOptions;
    use crate::services::sky_map::{
        density_colored_sky_map, project_sky_positions, shift_right_ascension, tick_labels,
        Projection,
    };
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_shift_right_ascension() {
        assert_eq!(shift_right_ascension(0.0, 0.0), 0.0);
        assert_eq!(shift_right_ascension(180.0, 0.0), -180.0);
        assert_eq!(shift_right_ascension(181.0, 0.0), 179.0);
        assert_eq!(shift_right_ascension(350.0, 0.0), 10.0);
        assert_eq!(shift_right_ascension(0.0, 90.0), 90.0);
        assert_eq!(shift_right_ascension(120.0, 90.0), -30.0);
    }

    #[test]
    fn test_tick_labels_follow_origin() {
        assert_eq!(
            tick_labels(0.0),
            vec![150.0, 120.0, 90.0, 60.0, 30.0, 0.0, 330.0, 300.0, 270.0, 240.0, 210.0]
        );
        let shifted = tick_labels(60.0);
        assert_eq!(shifted[0], 210.0);
        assert_eq!(shifted[5], 60.0);
        assert_eq!(shifted[10], 270.0);
    }

    #[test]
    fn test_projection_parsing() {
        assert_eq!("Mollweide".parse::<Projection>().unwrap(), Projection::Mollweide);
        assert_eq!("hammer".parse::<Projection>().unwrap(), Projection::Hammer);
        assert!("mercator".parse::<Projection>().is_err());
        assert_eq!(Projection::default().to_string(), "mollweide");
    }

    #[test]
    fn test_project_sky_positions() {
        let batch = CoordinateBatch::from_columns(&[90.0, 270.0], &[90.0, -45.0]).unwrap();
        let map = project_sky_positions(&batch, 0.0, Projection::Aitoff).unwrap();

        assert_eq!(map.total_count, 2);
        assert_relative_eq!(map.x_rad[0], -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(map.x_rad[1], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(map.y_rad[0], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(map.y_rad[1], -FRAC_PI_2 / 2.0, epsilon = 1e-12);
        assert_eq!(map.ra_min, 90.0);
        assert_eq!(map.ra_max, 270.0);
        assert_eq!(map.dec_min, -45.0);
        assert_eq!(map.dec_max, 90.0);
        assert!(map.values.is_none());
    }

    #[test]
    fn test_empty_batch_defaults() {
        let map = project_sky_positions(&CoordinateBatch::default(), 0.0, Projection::Mollweide)
            .unwrap();
        assert_eq!(map.total_count, 0);
        assert_eq!(map.ra_max, 360.0);
        assert_eq!(map.tick_labels.len(), 11);
    }

    #[test]
    fn test_invalid_origin() {
        let batch = CoordinateBatch::from_columns(&[10.0], &[10.0]).unwrap();
        for origin in [-30.0, 360.0, f64::NAN] {
            assert!(matches!(
                project_sky_positions(&batch, origin, Projection::Mollweide),
                Err(SkyPixError::InvalidArgument(_))
            ));
        }
        // off-grid origins are accepted with a warning
        assert!(project_sky_positions(&batch, 45.0, Projection::Mollweide).is_ok());
    }

    #[test]
    fn test_values_length_checked() {
        let batch = CoordinateBatch::from_columns(&[10.0, 20.0], &[10.0, 20.0]).unwrap();
        let map = project_sky_positions(&batch, 0.0, Projection::Mollweide).unwrap();
        assert!(map.clone().with_values(vec![1.0]).is_err());
        assert_eq!(
            map.with_values(vec![1.0, 2.0]).unwrap().values,
            Some(vec![1.0, 2.0])
        );
    }

    #[test]
    fn test_density_colored_sky_map() {
        let batch =
            CoordinateBatch::from_columns(&[10.0, 10.0, 200.0], &[20.0, 20.0, -30.0]).unwrap();
        let map = density_colored_sky_map(
            &batch,
            Nside::new(1024).unwrap(),
            &DensityOptions::default(),
            0.0,
            Projection::Mollweide,
        )
        .unwrap();

        assert_eq!(map.values, Some(vec![2.0, 2.0, 1.0]));
    }
}
