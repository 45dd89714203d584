//! Headless симуляция Lairkeep
//!
//! Игрок заходит в зону монстра, стоит в радиусе атаки и получает урон.
//! Tuning можно передать RON файлом первым аргументом.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lairkeep_simulation::*;

fn main() {
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(source) => match CombatTuning::from_ron_str(&source) {
                Ok(tuning) => tuning,
                Err(err) => {
                    eprintln!("Invalid tuning {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => CombatTuning::default(),
    };

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
        .insert_resource(tuning.clone());

    let spawned = spawn_encounter(
        &mut app.world_mut().commands(),
        &tuning,
        Vec3::new(0.0, 0.0, -8.0),
        Vec3::ZERO,
        6.0,
    );
    let (player, monster) = match spawned {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("Cannot spawn encounter: {}", err);
            std::process::exit(1);
        }
    };

    app.world_mut().flush();

    println!("Starting Lairkeep headless simulation");

    // Игрок идёт к монстру (forward = -Z, монстр в +Z → разворачиваемся)
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.rotation = Quat::from_rotation_y(std::f32::consts::PI);
    }
    if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
        input.direction = Vec3::NEG_Z;
    }

    for tick in 0..600 {
        app.update();

        let world = app.world();
        let distance = match (world.get::<Transform>(player), world.get::<Transform>(monster)) {
            (Some(p), Some(m)) => p.translation.distance(m.translation),
            _ => break,
        };

        // Дошли до монстра — останавливаемся
        if distance < 1.5 {
            if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
                input.direction = Vec3::ZERO;
            }
        }

        if tick % 20 == 0 {
            let world = app.world();
            let phase = world.get::<AggroState>(monster).map(AggroState::phase);
            let hp = world.get::<Health>(player).map(Health::current);
            println!("Tick {}: distance {:.2}, monster {:?}, player hp {:?}", tick, distance, phase, hp);
        }

        if app.world().get::<Dead>(player).is_some() {
            println!("Player died at tick {}", tick);
            break;
        }
    }

    println!("Simulation complete!");
}
