pub mod bodies;
pub mod game;
pub mod orbit;
pub mod scene;
pub mod skybox;

use game::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system");
