use bevy::prelude::*;
use drone_sim::{
    components::{CrashEvent, Crashed, DroneConfig, FlightState, StageCommand},
    plugins::DronePlugin,
    resources::{LoggingConfig, PhoneLink, SimulationConfig},
    systems::DatagramSource,
};

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    simulation: SimulationConfig,
    drones: Vec<(DroneConfig, FlightState)>,
    phone_source: Option<Box<dyn DatagramSource>>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            drones: Vec::new(),
            phone_source: None,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drone(mut self, config: DroneConfig, state: FlightState) -> Self {
        self.drones.push((config, state));
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.simulation.time_step = time_step;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.simulation.logging = logging;
        self
    }

    pub fn with_phone_source(mut self, source: Box<dyn DatagramSource>) -> Self {
        self.phone_source = Some(source);
        self
    }

    pub fn build(self) -> TestApp {
        let mut plugin = DronePlugin::new(self.simulation);
        for (config, state) in self.drones {
            plugin = plugin.with_drone(config, state);
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(plugin);
        app.finish();
        app.cleanup();

        // Run Startup so the drones exist
        app.update();

        if let Some(source) = self.phone_source {
            app.insert_resource(PhoneLink::new(source));
        }

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Run the fixed schedule directly so ticks do not depend on wall time.
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn drone(&mut self, name: &str) -> Option<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<(Entity, &Name), With<DroneConfig>>();
        query
            .iter(world)
            .find(|(_, drone)| drone.as_str() == name)
            .map(|(entity, _)| entity)
    }

    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.app.world().get::<T>(entity)
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn command(&mut self, entity: Entity, command: StageCommand) {
        self.app.world_mut().entity_mut(entity).insert(command);
    }

    pub fn is_crashed(&self, entity: Entity) -> bool {
        self.app.world().get::<Crashed>(entity).is_some()
    }

    /// Crash events sent since the app was built.
    pub fn crash_events(&self) -> Vec<CrashEvent> {
        self.app
            .world()
            .resource::<Events<CrashEvent>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }
}
