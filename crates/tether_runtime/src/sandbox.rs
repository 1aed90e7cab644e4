//! Sandbox scene and its demo scripts

use tether_core::ecs::{EntityBuilder, EntityId, Rigidbody, ScriptComponent, Transform, World};
use tether_script::prelude::*;
use tether_script::{ScriptEngine, ScriptError};
use tether_services::settings::{EntitySettings, SceneSettings};

/// Free-flying camera: arrows move it, Q/E pitch it.
pub struct CameraScript {
    entity: Entity,
    transform: Option<TransformComponent>,
    pub speed: f32,
    pub rot_speed: f32,
}

impl EntityScript for CameraScript {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn on_create(&mut self, calls: &mut dyn InternalCalls) {
        self.entity.log(calls, "Camera created");
        self.transform = self.entity.get_component::<TransformComponent>(calls);
    }

    fn on_update(&mut self, calls: &mut dyn InternalCalls, ts: Timestep) {
        let Some(transform) = self.transform else {
            return;
        };
        let dt = ts.seconds();

        let rot_velocity = Vec3::new(Input::axis(calls, KeyCode::Q, KeyCode::E), 0.0, 0.0);
        let velocity = Vec3::new(
            Input::axis(calls, KeyCode::Left, KeyCode::Right),
            0.0,
            Input::axis(calls, KeyCode::Up, KeyCode::Down),
        );

        let rotation = transform.rotation(calls);
        transform.set_rotation(calls, rotation + rot_velocity * self.rot_speed * dt);
        let translation = transform.translation(calls);
        transform.set_translation(calls, translation + velocity * self.speed * dt);
    }
}

/// Physics-driven player: WASD pushes its rigidbody.
pub struct PlayerScript {
    entity: Entity,
    pub force: f32,
    pub time: f32,
}

impl EntityScript for PlayerScript {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn on_create(&mut self, calls: &mut dyn InternalCalls) {
        self.entity.log(calls, "Player created");
    }

    fn on_update(&mut self, calls: &mut dyn InternalCalls, ts: Timestep) {
        self.time += ts.seconds();

        let direction = Vec3::new(
            Input::axis(calls, KeyCode::A, KeyCode::D),
            0.0,
            Input::axis(calls, KeyCode::W, KeyCode::S),
        );
        if direction == Vec3::ZERO {
            return;
        }
        if let Some(body) = self.entity.get_component::<RigidbodyComponent>(calls) {
            body.add_force(calls, direction * self.force);
        }
    }

    fn on_destroy(&mut self, calls: &mut dyn InternalCalls) {
        self.entity
            .log(calls, &format!("Player destroyed after {:.2}s", self.time));
    }
}

pub fn register_scripts(engine: &mut ScriptEngine) -> Result<(), ScriptError> {
    engine.register("Camera", |entity| CameraScript {
        entity,
        transform: None,
        speed: 2.0,
        rot_speed: 1.0,
    })?;
    engine.register("Player", |entity| PlayerScript {
        entity,
        force: 10.0,
        time: 0.0,
    })?;
    Ok(())
}

/// Scene used when the settings file describes none.
pub fn default_scene() -> SceneSettings {
    SceneSettings {
        entities: vec![
            EntitySettings {
                name: "Camera".to_string(),
                transform: Transform::from_translation(Vec3::new(0.0, 1.0, 5.0)),
                rigidbody: None,
                script: Some("Camera".to_string()),
            },
            EntitySettings {
                name: "Player".to_string(),
                transform: Transform::default(),
                rigidbody: Some(Rigidbody::default()),
                script: Some("Player".to_string()),
            },
            EntitySettings {
                name: "Ball".to_string(),
                transform: Transform::from_translation(Vec3::new(2.0, 5.0, 0.0)),
                rigidbody: Some(Rigidbody::falling()),
                script: None,
            },
        ],
    }
}

/// Spawn the configured scene, or the default one if it is empty.
pub fn build_scene(world: &mut World, scene: &SceneSettings) -> Vec<EntityId> {
    let fallback;
    let scene = if scene.entities.is_empty() {
        fallback = default_scene();
        &fallback
    } else {
        scene
    };

    scene
        .entities
        .iter()
        .map(|settings| world.spawn(entity_builder(settings)))
        .collect()
}

fn entity_builder(settings: &EntitySettings) -> EntityBuilder {
    let name = if settings.name.is_empty() {
        "Entity"
    } else {
        settings.name.as_str()
    };
    let mut builder = EntityBuilder::new().named(name).with(settings.transform);
    if let Some(body) = &settings.rigidbody {
        builder = builder.with(body.clone());
    }
    if let Some(class) = &settings.script {
        builder = builder.with(ScriptComponent::new(class.as_str()));
    }
    builder
}
