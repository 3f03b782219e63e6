//! Command script parser
//!
//! One command per line. Command names are case-insensitive and may carry
//! the `gl` prefix (`glTranslatef` and `translate` are the same command).
//! `#` starts a comment; blank lines are skipped.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{hex_digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt},
    multi::count,
    number::complete::{double, float},
    sequence::preceded,
    IResult,
};

use glmx_core::MatrixMode;

/// Matrix mode as written in a script: a known name or a raw GL enum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeArg {
    Named(MatrixMode),
    Raw(u32),
}

/// A single script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MatrixMode(ModeArg),
    LoadIdentity,
    LoadMatrix([f32; 16]),
    MultMatrix([f32; 16]),
    PushMatrix,
    PopMatrix,
    Translate(f32, f32, f32),
    Scale(f32, f32, f32),
    Rotate(f32, f32, f32, f32),
    Frustum([f64; 6]),
    Ortho([f64; 6]),
    Perspective(f64, f64, f64, f64),
    Print,
    Project([f32; 4]),
}

/// A command that failed to parse
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: cannot parse `{text}`")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
}

/// Parse a whole script, skipping blank and comment lines.
pub fn parse_script(input: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_line(line).ok_or_else(|| ParseError {
            line: index + 1,
            text: line.to_string(),
        })?;
        commands.push(command);
    }
    Ok(commands)
}

/// Parse one non-empty command line.
pub fn parse_line(line: &str) -> Option<Command> {
    match all_consuming(preceded(space0, command))(line.trim_end()) {
        Ok((_, command)) => Some(command),
        Err(_) => None,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn command(input: &str) -> IResult<&str, Command> {
    let (input, _) = opt(tag_no_case("gl"))(input)?;
    alt((
        map(preceded(tag_no_case("MatrixMode"), preceded(space1, mode_arg)), Command::MatrixMode),
        map(name("LoadIdentity"), |_| Command::LoadIdentity),
        map(preceded(name("LoadMatrix"), floats::<16>), Command::LoadMatrix),
        map(preceded(name("MultMatrix"), floats::<16>), Command::MultMatrix),
        map(name("PushMatrix"), |_| Command::PushMatrix),
        map(name("PopMatrix"), |_| Command::PopMatrix),
        map(preceded(name("Translate"), floats::<3>), |[x, y, z]| Command::Translate(x, y, z)),
        map(preceded(name("Scale"), floats::<3>), |[x, y, z]| Command::Scale(x, y, z)),
        map(preceded(name("Rotate"), floats::<4>), |[a, x, y, z]| Command::Rotate(a, x, y, z)),
        map(preceded(name("Frustum"), doubles::<6>), Command::Frustum),
        map(preceded(name("Ortho"), doubles::<6>), Command::Ortho),
        map(preceded(name("Perspective"), doubles::<4>), |[fovy, aspect, n, f]| {
            Command::Perspective(fovy, aspect, n, f)
        }),
        map(name("Print"), |_| Command::Print),
        map(preceded(name("Project"), floats::<4>), Command::Project),
    ))(input)
}

/// A command name with an optional GL type suffix (`f`/`d`), e.g.
/// `Translatef`.
fn name<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, ()> {
    move |input: &'a str| {
        let (input, _) = tag_no_case(word)(input)?;
        let (input, _) = opt(alt((tag_no_case("f"), tag_no_case("d"))))(input)?;
        Ok((input, ()))
    }
}

fn floats<const N: usize>(input: &str) -> IResult<&str, [f32; N]> {
    let (input, values) = count(preceded(space1, float), N)(input)?;
    let mut out = [0.0; N];
    out.copy_from_slice(&values);
    Ok((input, out))
}

/// Projection bounds are `GLdouble` in GL and stay double here.
fn doubles<const N: usize>(input: &str) -> IResult<&str, [f64; N]> {
    let (input, values) = count(preceded(space1, double), N)(input)?;
    let mut out = [0.0; N];
    out.copy_from_slice(&values);
    Ok((input, out))
}

fn mode_arg(input: &str) -> IResult<&str, ModeArg> {
    alt((
        map(
            map_res(preceded(tag_no_case("0x"), hex_digit1), |hex: &str| {
                u32::from_str_radix(hex, 16)
            }),
            ModeArg::Raw,
        ),
        map_res(take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'), mode_name),
    ))(input)
}

fn mode_name(word: &str) -> Result<ModeArg, ()> {
    let word = word.to_ascii_uppercase();
    let word = word.strip_prefix("GL_").unwrap_or(&word);
    match word {
        "MODELVIEW" => Ok(ModeArg::Named(MatrixMode::ModelView)),
        "PROJECTION" => Ok(ModeArg::Named(MatrixMode::Projection)),
        "TEXTURE" => Ok(ModeArg::Named(MatrixMode::Texture)),
        _ => word.parse::<u32>().map(ModeArg::Raw).map_err(|_| ()),
    }
}
