use std::sync::Arc;

use training_core::app::{get_courses, get_student_courses, login};
use training_core::error::Result;
use training_core::model::structs::Role;
use training_core::request::Gateway;
use training_core::session::{FileSessionStore, Session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        println!("usage: {} email password", args[0]);
        return Ok(());
    }

    let email = args[1].clone();
    let password = args[2].clone();

    let gateway = Gateway::from_env().await?;
    let store = FileSessionStore::open(FileSessionStore::default_path())?;
    let session = Session::new(Arc::new(store));

    let user = login(&gateway, &session, &email, &password).await?;

    println!("Login success!");
    println!("=====================================");
    println!("email: {}", user.email);
    println!("role: {}", user.role.as_str());
    println!("=====================================");

    match user.role {
        Role::Teacher => {
            let courses = get_courses(&gateway, &session).await?;
            for course in &courses {
                let status = if course.is_published {
                    "published"
                } else {
                    "draft"
                };
                println!("[{}] {:<30} {}", course.id, course.title, status);
            }
            println!("{} course(s)", courses.len());
        }
        Role::Student => {
            let courses = get_student_courses(&gateway, &session).await?;
            for course in &courses {
                let status = if course.enrolled {
                    format!("{:.0}%", course.progress_percentage)
                } else {
                    "not enrolled".to_string()
                };
                println!("[{}] {:<30} {}", course.id, course.title, status);
            }
            println!("{} course(s)", courses.len());
        }
    }
    println!("=====================================");

    Ok(())
}
