use radar_scope_core::tui::{App, AppResult};

fn main() -> AppResult<()> {
    let mut app = App::new()?;
    app.run()?;
    Ok(())
}
