//! Layout-level pose checks across engine families.

use es_core::units::mm;
use es_core::{EngineGeometry, Layout};
use es_kinematics::{Bank, KinematicGeometryEngine, KinematicsError, StrokePhase, pose};

fn geometry(cylinders: u32, layout: Layout) -> EngineGeometry {
    EngineGeometry {
        cylinders,
        bore: mm(89.0),
        stroke: mm(79.0),
        rod_length: mm(150.0),
        compression_ratio: 10.5,
        layout,
    }
}

#[test]
fn v_layout_rejects_odd_cylinder_count() {
    let err = pose(&geometry(5, Layout::V { bank_angle_deg: 90.0 }), 0.0).unwrap_err();
    assert!(matches!(err, KinematicsError::InvalidParameter { .. }));
    assert!(KinematicGeometryEngine::new(&geometry(6, Layout::V { bank_angle_deg: 90.0 })).is_ok());
}

#[test]
fn boxer_rejects_odd_cylinder_count() {
    assert!(pose(&geometry(3, Layout::Boxer), 0.0).is_err());
}

#[test]
fn rod_not_longer_than_crank_is_rejected() {
    let g = EngineGeometry {
        rod_length: mm(39.5),
        ..geometry(4, Layout::Inline)
    };
    assert!(pose(&g, 0.0).is_err());
}

#[test]
fn boxer_four_pistons_move_in_opposition() {
    let poses = pose(&geometry(4, Layout::Boxer), 0.0).unwrap();
    // Same throw, 180° bank angle: mirror images across the crank plane
    let (left, right) = (&poses[0], &poses[1]);
    assert_eq!(left.bank, Bank::Left);
    assert_eq!(right.bank, Bank::Right);
    assert!((left.piston.x + right.piston.x).abs() < 1e-12);
    assert!(left.piston.x < 0.0);
    assert!(left.piston.z.abs() < 1e-12);
    assert_eq!(left.crank_pin, right.crank_pin);
}

#[test]
fn v8_throws_are_spread_along_the_crank() {
    let poses = pose(&geometry(8, Layout::V { bank_angle_deg: 90.0 }), 10.0).unwrap();
    let ys: Vec<f64> = poses.iter().step_by(2).map(|p| p.crank_pin.y).collect();
    let pitch = 1.2 * 0.089;
    for w in ys.windows(2) {
        assert!((w[1] - w[0] - pitch).abs() < 1e-12);
    }
    assert!((ys[0] + ys[3]).abs() < 1e-12);
    let angles: Vec<f64> = poses.iter().step_by(2).map(|p| p.crank_angle_deg).collect();
    assert_eq!(angles, vec![10.0, 190.0, 370.0, 550.0]);
}

#[test]
fn every_stroke_is_represented_on_an_inline_four() {
    let poses = pose(&geometry(4, Layout::Inline), 45.0).unwrap();
    let strokes: Vec<StrokePhase> = poses.iter().map(|p| p.stroke).collect();
    assert_eq!(
        strokes,
        vec![
            StrokePhase::Intake,
            StrokePhase::Compression,
            StrokePhase::Power,
            StrokePhase::Exhaust
        ]
    );
}

#[test]
fn repeated_calls_are_bit_identical() {
    let engine = KinematicGeometryEngine::new(&geometry(6, Layout::V { bank_angle_deg: 60.0 })).unwrap();
    assert_eq!(engine.pose(271.3).unwrap(), engine.pose(271.3).unwrap());
}
