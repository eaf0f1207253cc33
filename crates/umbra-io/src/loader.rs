//! Mesh loader.
//!
//! Parses the four count-prefixed sections into a [`MeshTopology`].
//! Every structural problem in the text (bad count line, wrong field
//! count, non-numeric token, truncated section, trailing content) is a
//! [`UmbraError::Format`] carrying the 1-based line number. Once parsed,
//! the topology is validated a single time; index errors surface as
//! [`UmbraError::InvalidMesh`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use umbra_math::Vec3;
use umbra_mesh::{Corner, Edge, MeshTopology};
use umbra_types::{UmbraError, UmbraResult};

/// Upper bound on records reserved up front from a count line.
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

/// Loads a mesh from a file.
pub fn load_mesh(path: impl AsRef<Path>) -> UmbraResult<MeshTopology> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = parse_mesh(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        corners = mesh.corner_count(),
        triangles = mesh.triangle_count(),
        edges = mesh.edge_count(),
        "mesh loaded"
    );
    Ok(mesh)
}

/// Parses a mesh from an in-memory string.
pub fn parse_mesh_str(text: &str) -> UmbraResult<MeshTopology> {
    parse_mesh(text.as_bytes())
}

/// Parses a mesh from any buffered reader.
pub fn parse_mesh<R: BufRead>(reader: R) -> UmbraResult<MeshTopology> {
    let mut lines = LineReader::new(reader);

    let vertices = read_section(&mut lines, "vertex", |line, no| {
        let [x, y, z] = fields::<f32, 3>(line, no, "vertex")?;
        Ok(Vec3::new(x, y, z))
    })?;

    let corners = read_section(&mut lines, "corner", |line, no| {
        let tokens = split_exact(line, no, 4, 4, "corner")?;
        let vertex = parse_token::<u32>(tokens[0], no)?;
        let nx = parse_token::<f32>(tokens[1], no)?;
        let ny = parse_token::<f32>(tokens[2], no)?;
        let nz = parse_token::<f32>(tokens[3], no)?;
        Ok(Corner {
            vertex,
            normal: Vec3::new(nx, ny, nz),
        })
    })?;

    let triangles = read_section(&mut lines, "triangle", |line, no| {
        fields::<u32, 3>(line, no, "triangle")
    })?;
    let indices: Vec<u32> = triangles.into_iter().flatten().collect();

    let edges = read_section(&mut lines, "edge", |line, no| {
        let tokens = split_exact(line, no, 3, 4, "edge")?;
        let v0 = parse_token::<u32>(tokens[0], no)?;
        let v1 = parse_token::<u32>(tokens[1], no)?;
        let tri_a = parse_token::<u32>(tokens[2], no)?;
        match tokens.get(3) {
            Some(t) => Ok(Edge::interior(v0, v1, tri_a, parse_token::<u32>(t, no)?)),
            None => Ok(Edge::boundary(v0, v1, tri_a)),
        }
    })?;

    lines.expect_end()?;

    MeshTopology::new(vertices, corners, indices, edges)
}

/// Line source that tracks the current 1-based line number.
struct LineReader<R> {
    inner: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Reads the next line, failing on end of input.
    fn next_line(&mut self, expected: &str) -> UmbraResult<(&str, usize)> {
        self.buf.clear();
        let read = self.inner.read_line(&mut self.buf)?;
        self.line_no += 1;
        if read == 0 {
            return Err(UmbraError::format(
                self.line_no,
                format!("unexpected end of input, expected {expected}"),
            ));
        }
        Ok((self.buf.trim(), self.line_no))
    }

    /// Accepts only blank lines until end of input.
    fn expect_end(&mut self) -> UmbraResult<()> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(());
            }
            self.line_no += 1;
            if !self.buf.trim().is_empty() {
                return Err(UmbraError::format(
                    self.line_no,
                    "unexpected content after the edge section",
                ));
            }
        }
    }
}

/// Reads a count line followed by that many records.
fn read_section<R, T, F>(lines: &mut LineReader<R>, name: &str, mut parse: F) -> UmbraResult<Vec<T>>
where
    R: BufRead,
    F: FnMut(&str, usize) -> UmbraResult<T>,
{
    let count = {
        let (line, no) = lines.next_line(&format!("{name} count"))?;
        let [count] = fields::<usize, 1>(line, no, &format!("{name} count"))?;
        count
    };

    // The count is untrusted until the records are actually read.
    let mut out = Vec::with_capacity(count.min(MAX_PREALLOCATED_RECORDS));
    for i in 0..count {
        let (line, no) = lines.next_line(&format!("{name} {} of {count}", i + 1))?;
        out.push(parse(line, no)?);
    }
    Ok(out)
}

/// Splits a line into between `min` and `max` whitespace-separated tokens.
fn split_exact<'a>(
    line: &'a str,
    line_no: usize,
    min: usize,
    max: usize,
    what: &str,
) -> UmbraResult<Vec<&'a str>> {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    if tokens.len() < min || tokens.len() > max {
        let expected = if min == max {
            format!("{min}")
        } else {
            format!("{min} or {max}")
        };
        return Err(UmbraError::format(
            line_no,
            format!("{what} line has {} fields, expected {expected}", tokens.len()),
        ));
    }
    Ok(tokens)
}

/// Parses exactly `N` tokens of the same type.
fn fields<T: FromStr + Copy + Default, const N: usize>(
    line: &str,
    line_no: usize,
    what: &str,
) -> UmbraResult<[T; N]> {
    let tokens = split_exact(line, line_no, N, N, what)?;
    let mut out = [T::default(); N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = parse_token(token, line_no)?;
    }
    Ok(out)
}

fn parse_token<T: FromStr>(token: &str, line_no: usize) -> UmbraResult<T> {
    token
        .parse()
        .map_err(|_| UmbraError::format(line_no, format!("cannot parse {token:?} as a number")))
}
