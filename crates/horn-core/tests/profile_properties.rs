//! Properties every profile generator must satisfy for valid input.

use approx::assert_relative_eq;
use horn_core::profiles::{
    ExponentialParams, HypexParams, JmlcParams, NeileParams, OblateSpheroidParams, PetfParams,
    SphericalParams,
};
use horn_core::{generate_profile, HornError, Profile, ProfileKind, ProfileParams};

fn assert_profile_invariants(kind: &ProfileKind, params: &ProfileParams, profile: &Profile) {
    let name = kind.name();
    let pts = profile.points();
    assert_eq!(pts.len(), params.segments + 1, "{name}: point count");
    assert_eq!(pts[0].x, 0.0, "{name}: first x");
    assert_eq!(pts[0].radius, params.throat_radius, "{name}: throat radius");
    if let Some(mouth) = params.mouth_radius {
        assert_eq!(pts[params.segments].radius, mouth, "{name}: mouth radius");
    }
    if let Some(length) = params.length {
        assert_relative_eq!(profile.length(), length, epsilon = 1e-6);
    }
    for (i, pair) in pts.windows(2).enumerate() {
        assert!(pair[1].x > pair[0].x, "{name}: x not increasing at {i}: {pair:?}");
        assert!(
            pair[1].radius >= pair[0].radius,
            "{name}: radius decreasing at {i}: {pair:?}"
        );
    }
}

#[test]
fn test_every_kind_with_defaults() {
    for params in [
        ProfileParams::new(0.025, 0.175, 0.3, 6),
        ProfileParams::new(0.0125, 0.3, 0.6, 80),
    ] {
        for kind in ProfileKind::all_with_defaults() {
            // JMLC fixes the length itself when it is reachable; give it
            // only the mouth.
            let params = match kind {
                ProfileKind::Jmlc(_) => ProfileParams {
                    length: None,
                    ..params
                },
                _ => params,
            };
            let profile = generate_profile(&kind, &params)
                .unwrap_or_else(|e| panic!("{} failed on {params:?}: {e}", kind.name()));
            assert_profile_invariants(&kind, &params, &profile);
        }
    }
}

#[test]
fn test_every_kind_accepts_equal_throat_and_mouth() {
    let straight = ProfileParams::new(0.05, 0.05, 0.3, 10);
    for kind in ProfileKind::all_with_defaults() {
        let params = match kind {
            ProfileKind::Jmlc(_) => ProfileParams {
                length: None,
                ..straight
            },
            _ => straight,
        };
        let profile = generate_profile(&kind, &params)
            .unwrap_or_else(|e| panic!("{} failed on a straight tube: {e}", kind.name()));
        assert_profile_invariants(&kind, &params, &profile);
        assert!(
            profile.points().iter().all(|p| p.radius == 0.05),
            "{}: radius changed along a straight tube",
            kind.name()
        );
    }
}

#[test]
fn test_every_kind_with_non_default_parameters() {
    let params = ProfileParams::new(0.02, 0.25, 0.45, 30);
    let kinds = [
        ProfileKind::Exponential(ExponentialParams {
            cutoff_hz: Some(300.0),
        }),
        ProfileKind::Hypex(HypexParams {
            t_factor: Some(0.3),
            cutoff_hz: Some(250.0),
        }),
        ProfileKind::Petf(PetfParams {
            t_throat: Some(0.8),
            t_mouth: Some(0.2),
            cutoff_hz: Some(350.0),
        }),
        ProfileKind::Neile(NeileParams {
            exponent: Some(2.5),
        }),
        ProfileKind::OblateSpheroid(OblateSpheroidParams {
            coverage_deg: Some(60.0),
            throat_angle_deg: Some(5.0),
        }),
        ProfileKind::Spherical(SphericalParams {
            throat_angle_deg: Some(12.0),
        }),
    ];
    for kind in kinds {
        let profile = generate_profile(&kind, &params).unwrap();
        assert_profile_invariants(&kind, &params, &profile);
    }
}

#[test]
fn test_jmlc_with_length_only() {
    let kind = ProfileKind::Jmlc(JmlcParams::default());
    let params = ProfileParams {
        mouth_radius: None,
        ..ProfileParams::new(0.025, 0.2, 0.15, 30)
    };
    let profile = generate_profile(&kind, &params).unwrap();
    assert_profile_invariants(&kind, &params, &profile);
}

#[test]
fn test_missing_parameters_fail_loudly() {
    let without_mouth = ProfileParams {
        mouth_radius: None,
        ..ProfileParams::new(0.025, 0.175, 0.3, 6)
    };
    for kind in ProfileKind::all_with_defaults() {
        let result = generate_profile(&kind, &without_mouth);
        if matches!(kind, ProfileKind::Jmlc(_)) {
            // Length alone is enough for JMLC, but 0.3 m is past the
            // 90° mouth angle for these defaults.
            assert!(result.is_err());
            continue;
        }
        assert_eq!(
            result.unwrap_err(),
            HornError::MissingParameter {
                profile: kind.name(),
                name: "mouth_radius"
            }
        );
    }
}

#[test]
fn test_volume_grows_with_flare_speed() {
    // The exponential wall lies inside the cone between the same end points.
    let params = ProfileParams::new(0.025, 0.175, 0.3, 60);
    let volume = |kind: ProfileKind| generate_profile(&kind, &params).unwrap().volume();
    let conical = volume(ProfileKind::Conical);
    let exponential = volume(ProfileKind::Exponential(ExponentialParams::default()));
    assert!(conical > exponential, "{conical} vs {exponential}");
}
