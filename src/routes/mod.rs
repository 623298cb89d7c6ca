pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index)
        .service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
