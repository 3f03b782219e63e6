//! Terminal inspector for the glmx matrix state
//!
//! Runs a command script against a `MatrixContext` and prints the
//! matrices it produces.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};

use glmx_core::matrix::{multiply, to_columns};
use glmx_core::{ErrorFlag, GlError, Mat4, MatrixContext, StackConfig, Vec4};

pub mod script;

pub use script::{parse_script, Command, ModeArg, ParseError};

/// Executes script commands and renders their results.
pub struct Inspector {
    context: MatrixContext<ErrorFlag>,
    errors: Vec<(usize, GlError)>,
}

impl Inspector {
    pub fn new(config: StackConfig) -> Self {
        Self {
            context: MatrixContext::new(config, ErrorFlag::new()),
            errors: Vec::new(),
        }
    }

    pub fn context(&self) -> &MatrixContext<ErrorFlag> {
        &self.context
    }

    /// Errors raised so far, tagged with the 1-based command index.
    pub fn errors(&self) -> &[(usize, GlError)] {
        &self.errors
    }

    /// Run every command in order, writing output to `writer`.
    pub fn run<W: Write>(&mut self, commands: &[Command], writer: &mut W) -> io::Result<()> {
        info!("running {} commands", commands.len());
        for (index, command) in commands.iter().enumerate() {
            self.execute(index + 1, command, writer)?;
        }
        writer.flush()
    }

    /// Apply one command; any GL error it raises is printed and recorded.
    pub fn execute<W: Write>(
        &mut self,
        index: usize,
        command: &Command,
        writer: &mut W,
    ) -> io::Result<()> {
        debug!("#{} {:?}", index, command);
        let ctx = &mut self.context;
        match *command {
            Command::MatrixMode(ModeArg::Named(mode)) => ctx.matrix_mode(mode),
            Command::MatrixMode(ModeArg::Raw(value)) => ctx.matrix_mode_raw(value),
            Command::LoadIdentity => ctx.load_identity(),
            Command::LoadMatrix(ref values) => ctx.load_matrix_slice(values),
            Command::MultMatrix(ref values) => ctx.mult_matrix_slice(values),
            Command::PushMatrix => ctx.push_matrix(),
            Command::PopMatrix => ctx.pop_matrix(),
            Command::Translate(x, y, z) => ctx.translate(x, y, z),
            Command::Scale(x, y, z) => ctx.scale(x, y, z),
            Command::Rotate(angle, x, y, z) => ctx.rotate(angle, x, y, z),
            Command::Frustum([l, r, b, t, n, f]) => ctx.frustum(l, r, b, t, n, f),
            Command::Ortho([l, r, b, t, n, f]) => ctx.ortho(l, r, b, t, n, f),
            Command::Perspective(fovy, aspect, n, f) => ctx.perspective(fovy, aspect, n, f),
            Command::Print => self.print_state(writer)?,
            Command::Project(v) => {
                let clip = multiply(self.context.final_matrix(), &Vec4::from(v));
                queue!(
                    writer,
                    SetForegroundColor(Color::Yellow),
                    Print(format!("project {:?} -> ", v)),
                    ResetColor,
                    Print(format_vector(&clip)),
                    Print("\n")
                )?;
            }
        }

        if let Some(error) = self.context.get_error() {
            self.errors.push((index, error));
            queue!(
                writer,
                SetForegroundColor(Color::Red),
                Print(format!("#{}: GL error 0x{:04X} ({})\n", index, error.code(), error)),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn print_state<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let ctx = &self.context;
        queue!(
            writer,
            SetForegroundColor(Color::Cyan),
            Print(format!(
                "{} depth {}/{} | persp norm {:.6}\n",
                ctx.mode(),
                ctx.current_depth(),
                ctx.stack(ctx.mode()).capacity(),
                ctx.persp_norm_factor()
            )),
            ResetColor
        )?;
        draw_matrix(writer, "current", ctx.current_matrix())?;
        draw_matrix(writer, "final", ctx.final_matrix())
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(StackConfig::default())
    }
}

/// Print a matrix in row order, the way it reads on paper.
pub fn draw_matrix<W: Write>(writer: &mut W, label: &str, m: &Mat4) -> io::Result<()> {
    queue!(
        writer,
        SetForegroundColor(Color::Green),
        Print(format!("{}:\n", label)),
        ResetColor
    )?;
    let columns = to_columns(m);
    for row in 0..4 {
        let line: Vec<String> = columns
            .iter()
            .map(|col| format!("{:>12.6}", col[row]))
            .collect();
        queue!(writer, Print(format!("  [{} ]\n", line.join(""))))?;
    }
    Ok(())
}

/// Read a script from `path`, or from stdin when no path is given.
///
/// Read failures keep their original `io::ErrorKind`.
pub fn load_script(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to read script {}: {}", path, e))
        }),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn format_vector(v: &Vec4) -> String {
    format!("({:.6}, {:.6}, {:.6}, {:.6})", v[0], v[1], v[2], v[3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glmx_core::matrix::from_gl_slice;
    use glmx_core::MatrixMode;

    fn run(source: &str) -> (Inspector, String) {
        let commands = parse_script(source).unwrap();
        let mut inspector = Inspector::default();
        let mut out = Vec::new();
        inspector.run(&commands, &mut out).unwrap();
        (inspector, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_translate_script() {
        let (inspector, _) = run("Translate 1 0 0\n");
        assert_eq!(inspector.context().current_matrix()[(0, 3)], 1.0);
        assert!(inspector.errors().is_empty());
    }

    #[test]
    fn test_errors_are_recorded_per_command() {
        let (inspector, out) =
            run("PopMatrix\nMatrixMode 0x1234\nMatrixMode PROJECTION\nPushMatrix\nPushMatrix\n");
        assert_eq!(
            inspector.errors(),
            &[
                (1, GlError::StackUnderflow),
                (2, GlError::InvalidEnum),
                (5, GlError::StackOverflow),
            ]
        );
        assert!(out.contains("GL error 0x0504"));
        assert_eq!(inspector.context().mode(), MatrixMode::Projection);
    }

    #[test]
    fn test_print_and_project() {
        let (_, out) =
            run("MatrixMode PROJECTION\nFrustum -1 1 -1 1 1 10\nPrint\nProject 0 0 -1 1\n");
        assert!(out.contains("GL_PROJECTION depth 0/2"));
        assert!(out.contains("persp norm 0.181818"));
        assert!(out.contains("current:"));
        assert!(out.contains("final:"));
        assert!(out.contains("(0.000000, 0.000000, -1.000000, 1.000000)"));
    }

    #[test]
    fn test_load_script_keeps_error_kind() {
        let missing = load_script(Some("/nonexistent/glmx/camera.glmx")).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);

        let name = format!("glmx-bad-utf8-{}.glmx", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        let result = load_script(path.to_str());
        fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_script_reads_file() {
        let name = format!("glmx-script-{}.glmx", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "PushMatrix\n").unwrap();
        let source = load_script(path.to_str()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(parse_script(&source).unwrap(), vec![Command::PushMatrix]);
    }

    #[test]
    fn test_draw_matrix_row_order() {
        let mut out = Vec::new();
        let m = from_gl_slice(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            5.0, 6.0, 7.0, 1.0,
        ]);
        draw_matrix(&mut out, "m", &m).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first_row = text.lines().nth(1).unwrap();
        assert!(first_row.trim_end().ends_with("5.000000 ]"));
    }
}
