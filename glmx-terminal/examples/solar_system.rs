/// Example: nested model-view transforms with push/pop
///
/// Usage: cargo run --example solar_system -- [angle-in-radians]

use std::env;
use std::io::{self, stdout, Write};

use glmx_core::matrix::multiply;
use glmx_core::{LogSink, MatrixContext, MatrixMode, StackConfig, Vec4};
use glmx_terminal::draw_matrix;

fn main() -> io::Result<()> {
    env_logger::init();

    let angle: f32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0.5);

    // stack errors go to the log (RUST_LOG=warn)
    let mut ctx = MatrixContext::new(StackConfig::default(), LogSink);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.perspective(std::f64::consts::FRAC_PI_4, 4.0 / 3.0, 1.0, 100.0);
    ctx.matrix_mode(MatrixMode::ModelView);
    ctx.translate(0.0, 0.0, -20.0);

    let mut out = stdout();
    let origin = Vec4::new(0.0, 0.0, 0.0, 1.0);

    // sun
    ctx.push_matrix();
    ctx.rotate(angle, 0.0, 1.0, 0.0);
    draw_matrix(&mut out, "sun", ctx.final_matrix())?;

    // planet orbiting the sun
    ctx.push_matrix();
    ctx.translate(8.0, 0.0, 0.0);
    ctx.rotate(angle * 3.0, 0.0, 1.0, 0.0);
    let planet = multiply(ctx.final_matrix(), &origin);

    // moon orbiting the planet
    ctx.push_matrix();
    ctx.translate(2.0, 0.0, 0.0);
    let moon = multiply(ctx.final_matrix(), &origin);
    ctx.pop_matrix();

    ctx.pop_matrix();
    ctx.pop_matrix();

    writeln!(out, "planet clip position: {:?}", planet.as_slice())?;
    writeln!(out, "moon clip position:   {:?}", moon.as_slice())?;
    writeln!(out, "persp norm factor:    {}", ctx.persp_norm_factor())?;
    Ok(())
}
