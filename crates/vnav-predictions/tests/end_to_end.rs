// End-to-end checks of both solvers with the default models.
// A representative A320 climb step out of 10 000 ft and a cruise leg at FL350.

use approx::assert_relative_eq;
use vnav_predictions::{
    default_predictor, solve_climb_step, solve_level_step, AccelFactorMode, ClimbStepRequest,
    LevelStepRequest,
};

fn climb_out_of_fl100() -> ClimbStepRequest {
    ClimbStepRequest {
        initial_altitude_ft: 10_000.0,
        step_size_ft: 2_000.0,
        target_cas_kt: 250.0,
        target_mach: 0.78,
        climb_n1_pct: 90.0,
        zero_fuel_weight_lb: 120_000.0,
        initial_fuel_weight_lb: 30_000.0,
        headwind_kt: 10.0,
        isa_dev_c: 0.0,
        tropopause_altitude_ft: 36_000.0,
    }
}

fn cruise_at_fl350() -> LevelStepRequest {
    LevelStepRequest {
        altitude_ft: 35_000.0,
        step_size_nm: 100.0,
        target_cas_kt: 280.0,
        target_mach: 0.80,
        zero_fuel_weight_lb: 120_000.0,
        initial_fuel_weight_lb: 20_000.0,
        headwind_kt: 0.0,
        isa_dev_c: 0.0,
    }
}

#[test]
fn climb_step_out_of_fl100() {
    let sol = default_predictor().climb_step(&climb_out_of_fl100()).unwrap();
    let seg = sol.segment;

    assert!(seg.path_angle > 0.0, "path angle should be positive, got {}", seg.path_angle);
    assert!(seg.vertical_speed > 0.0, "vertical speed should be positive, got {}", seg.vertical_speed);
    assert!(seg.fuel_burned > 0.0, "fuel burned should be positive, got {}", seg.fuel_burned);
    assert!(seg.distance_traveled > 0.0);
    assert!(sol.iterations <= 5, "took {} iterations", sol.iterations);

    // below 10° and a few minutes for 2000 ft
    assert!(seg.path_angle < 10_f64.to_radians());
    assert!(seg.time_elapsed > 0.2 && seg.time_elapsed < 3.0, "time {}", seg.time_elapsed);
}

#[test]
fn free_function_matches_predictor() {
    let req = climb_out_of_fl100();
    assert_eq!(solve_climb_step(&req).unwrap(), default_predictor().solve_climb_step(&req).unwrap());
}

#[test]
fn level_step_at_fl350() {
    let seg = solve_level_step(&cruise_at_fl350()).unwrap();

    assert_eq!(seg.distance_traveled, 100.0, "level step covers exactly the requested distance");
    assert_eq!(seg.path_angle, 0.0);
    assert_eq!(seg.vertical_speed, 0.0);
    assert!(seg.fuel_burned > 0.0);
    // ~460 kt TAS: 100 nm in about 13 minutes
    assert_relative_eq!(seg.time_elapsed, 13.0, max_relative = 0.05);
}

#[test]
fn fl350_at_m080_is_mach_limited() {
    let sol = default_predictor().level_step(&cruise_at_fl350()).unwrap();
    assert_eq!(sol.speed_mode, AccelFactorMode::ConstantMach);
}

#[test]
fn chained_climb_steps_carry_fuel_forward() {
    let mut req = climb_out_of_fl100();
    let mut fuel = req.initial_fuel_weight_lb;
    let mut total_time = 0.0;

    for _ in 0..5 {
        let seg = solve_climb_step(&req).unwrap();
        fuel = seg.end_fuel_weight(fuel);
        total_time += seg.time_elapsed;
        req = ClimbStepRequest {
            initial_altitude_ft: req.initial_altitude_ft + req.step_size_ft,
            initial_fuel_weight_lb: fuel,
            ..req
        };
    }

    assert!(fuel < 30_000.0);
    assert!(fuel > 29_000.0, "10 000 ft of climb should not burn a tonne of fuel, {fuel} left");
    assert!(total_time > 2.0 && total_time < 10.0, "total time {total_time}");
}
