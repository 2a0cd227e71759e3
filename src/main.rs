#[actix_web::main]
async fn main() -> std::process::ExitCode {
    match anydem_lib::run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("anydem: {}", err);
            std::process::ExitCode::FAILURE
        }
    }
}
