//! COLLADA document assembly and writing
//!
//! This module lays out the fixed COLLADA 1.4.1 document skeleton for a
//! single triangle mesh and injects the mesh's numeric data: the flattened
//! vertex coordinate array and the flattened triangle index array. The
//! skeleton matches the single-mesh, single-scene-node layout produced by
//! SketchUp-style exporters, with fixed element ids (`ID2`..`ID10`) used as
//! the schema's cross-reference mechanism.

use crate::element::ele;
use crate::error::{Error, Result};
use nalgebra::storage::RawStorage;
use nalgebra::{Dim, Matrix, Scalar};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

/// COLLADA 1.4.1 schema namespace
pub const COLLADA_NS: &str = "http://www.collada.org/2005/11/COLLADASchema";

/// Flatten a matrix to space-separated decimal text, row-major
///
/// Values are printed through `Display`, which for floating-point scalars is
/// the shortest decimal string that re-parses to the identical bits. Tokens
/// are joined with single spaces, no leading or trailing separator; an empty
/// matrix yields an empty string.
fn matrix_text<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> String
where
    T: Scalar + Display,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    let mut tokens = Vec::with_capacity(matrix.nrows() * matrix.ncols());
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            tokens.push(matrix[(i, j)].to_string());
        }
    }
    tokens.join(" ")
}

/// Write a mesh as COLLADA XML
///
/// Serializes the vertex matrix `v` (one row per vertex, columns X,Y,Z) and
/// the face matrix `f` (one row per triangle, columns are vertex indices)
/// into a complete COLLADA document on `writer`. The caller is responsible
/// for supplying three-column matrices with in-range indices; no validation
/// is performed.
///
/// # Example
///
/// ```
/// use libdae::write_collada_xml;
/// use nalgebra::DMatrix;
///
/// let v = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0]);
/// let f = DMatrix::from_row_slice(1, 3, &[0u32, 1, 2]);
///
/// let mut buffer = Vec::new();
/// write_collada_xml(&v, &f, &mut buffer).unwrap();
/// let xml = String::from_utf8(buffer).unwrap();
/// assert!(xml.contains("<p>0 1 2</p>"));
/// ```
pub fn write_collada_xml<T, I, W, RV, CV, SV, RF, CF, SF>(
    v: &Matrix<T, RV, CV, SV>,
    f: &Matrix<I, RF, CF, SF>,
    writer: W,
) -> Result<()>
where
    T: Scalar + Display,
    I: Scalar + Display,
    W: IoWrite,
    RV: Dim,
    CV: Dim,
    SV: RawStorage<T, RV, CV>,
    RF: Dim,
    CF: Dim,
    SF: RawStorage<I, RF, CF>,
{
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))?;

    let float_count = (v.nrows() * v.ncols()).to_string();
    let vertex_count = v.nrows().to_string();
    let triangle_count = f.nrows().to_string();
    let vertex_text = matrix_text(v);
    let index_text = matrix_text(f);

    let root = ele(
        "COLLADA",
        &[("xmlns", COLLADA_NS), ("version", "1.4.1")],
        "",
        vec![
            ele(
                "asset",
                &[],
                "",
                vec![
                    ele("unit", &[("meter", "0.0254000"), ("name", "inch")], "", vec![]),
                    ele("up_axis", &[], "Y_UP", vec![]),
                ],
            ),
            ele(
                "library_visual_scenes",
                &[],
                "",
                vec![ele(
                    "visual_scene",
                    &[("id", "ID2")],
                    "",
                    vec![ele(
                        "node",
                        &[("name", "SketchUp")],
                        "",
                        vec![ele(
                            "node",
                            &[("id", "ID3"), ("name", "group_0")],
                            "",
                            vec![
                                ele("matrix", &[], "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1", vec![]),
                                ele(
                                    "instance_geometry",
                                    &[("url", "#ID4")],
                                    "",
                                    vec![ele(
                                        "bind_material",
                                        &[],
                                        "",
                                        vec![ele("technique_common", &[], "", vec![])],
                                    )],
                                ),
                            ],
                        )],
                    )],
                )],
            ),
            ele(
                "library_geometries",
                &[],
                "",
                vec![ele(
                    "geometry",
                    &[("id", "ID4")],
                    "",
                    vec![ele(
                        "mesh",
                        &[],
                        "",
                        vec![
                            ele(
                                "source",
                                &[("id", "ID7")],
                                "",
                                vec![
                                    ele(
                                        "float_array",
                                        &[("count", float_count.as_str()), ("id", "ID10")],
                                        &vertex_text,
                                        vec![],
                                    ),
                                    ele(
                                        "technique_common",
                                        &[],
                                        "",
                                        vec![ele(
                                            "accessor",
                                            &[
                                                ("count", vertex_count.as_str()),
                                                ("source", "#ID8"),
                                                ("stride", "3"),
                                            ],
                                            "",
                                            vec![
                                                ele("param", &[("name", "X"), ("type", "float")], "", vec![]),
                                                ele("param", &[("name", "Y"), ("type", "float")], "", vec![]),
                                                ele("param", &[("name", "Z"), ("type", "float")], "", vec![]),
                                            ],
                                        )],
                                    ),
                                ],
                            ),
                            ele(
                                "vertices",
                                &[("id", "ID9")],
                                "",
                                vec![ele(
                                    "input",
                                    &[("semantic", "POSITION"), ("source", "#ID7")],
                                    "",
                                    vec![],
                                )],
                            ),
                            ele(
                                "triangles",
                                &[("count", triangle_count.as_str())],
                                "",
                                vec![
                                    ele(
                                        "input",
                                        &[("semantic", "VERTEX"), ("source", "#ID9")],
                                        "",
                                        vec![],
                                    ),
                                    ele("p", &[], &index_text, vec![]),
                                ],
                            ),
                        ],
                    )],
                )],
            ),
            ele(
                "scene",
                &[],
                "",
                vec![ele("instance_visual_scene", &[("url", "#ID2")], "", vec![])],
            ),
        ],
    );

    root.to_writer(&mut xml_writer)
}

/// Write a mesh to a COLLADA `.dae` file
///
/// Creates (or truncates) the file at `path` and writes the COLLADA document
/// for the mesh. Returns `true` on success. On any I/O or serialization
/// failure the error is printed to stderr and `false` is returned; the file
/// may be absent or truncated in that case.
///
/// # Example
///
/// ```no_run
/// use libdae::write_dae;
/// use nalgebra::DMatrix;
///
/// let v = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0]);
/// let f = DMatrix::from_row_slice(1, 3, &[0u32, 1, 2]);
/// assert!(write_dae("triangle.dae", &v, &f));
/// ```
pub fn write_dae<P, T, I, RV, CV, SV, RF, CF, SF>(
    path: P,
    v: &Matrix<T, RV, CV, SV>,
    f: &Matrix<I, RF, CF, SF>,
) -> bool
where
    P: AsRef<Path>,
    T: Scalar + Display,
    I: Scalar + Display,
    RV: Dim,
    CV: Dim,
    SV: RawStorage<T, RV, CV>,
    RF: Dim,
    CF: Dim,
    SF: RawStorage<I, RF, CF>,
{
    let path = path.as_ref();
    match write_dae_file(path, v, f) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Failed to write COLLADA file {}: {}", path.display(), err);
            false
        }
    }
}

fn write_dae_file<T, I, RV, CV, SV, RF, CF, SF>(
    path: &Path,
    v: &Matrix<T, RV, CV, SV>,
    f: &Matrix<I, RF, CF, SF>,
) -> Result<()>
where
    T: Scalar + Display,
    I: Scalar + Display,
    RV: Dim,
    CV: Dim,
    SV: RawStorage<T, RV, CV>,
    RF: Dim,
    CF: Dim,
    SF: RawStorage<I, RF, CF>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_collada_xml(v, f, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn unit_square() -> (DMatrix<f64>, DMatrix<u32>) {
        let v = DMatrix::from_row_slice(
            4,
            3,
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
        );
        let f = DMatrix::from_row_slice(2, 3, &[0, 1, 2, 0, 2, 3]);
        (v, f)
    }

    fn xml_for<T, I>(v: &DMatrix<T>, f: &DMatrix<I>) -> String
    where
        T: Scalar + Display,
        I: Scalar + Display,
    {
        let mut buffer = Vec::new();
        write_collada_xml(v, f, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_root_element_attributes() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains(
            "<COLLADA xmlns=\"http://www.collada.org/2005/11/COLLADASchema\" version=\"1.4.1\">"
        ));
    }

    #[test]
    fn test_asset_metadata() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains("<unit meter=\"0.0254000\" name=\"inch\"/>"));
        assert!(xml.contains("<up_axis>Y_UP</up_axis>"));
    }

    #[test]
    fn test_unit_square_counts_and_data() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains(
            "<float_array count=\"12\" id=\"ID10\">0 0 0 1 0 0 1 1 0 0 1 0</float_array>"
        ));
        assert!(xml.contains("<accessor count=\"4\" source=\"#ID8\" stride=\"3\">"));
        assert!(xml.contains("<triangles count=\"2\">"));
        assert!(xml.contains("<p>0 1 2 0 2 3</p>"));
    }

    #[test]
    fn test_accessor_params() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains("<param name=\"X\" type=\"float\"/>"));
        assert!(xml.contains("<param name=\"Y\" type=\"float\"/>"));
        assert!(xml.contains("<param name=\"Z\" type=\"float\"/>"));
    }

    #[test]
    fn test_scene_node_layout() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains("<visual_scene id=\"ID2\">"));
        assert!(xml.contains("<node name=\"SketchUp\">"));
        assert!(xml.contains("<node id=\"ID3\" name=\"group_0\">"));
        assert!(xml.contains("<matrix>1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1</matrix>"));
        assert!(xml.contains("<instance_geometry url=\"#ID4\">"));
        assert!(xml.contains("<technique_common/>"));
        assert!(xml.contains("<instance_visual_scene url=\"#ID2\"/>"));
    }

    #[test]
    fn test_cross_references_resolve() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        for id in ["ID2", "ID4", "ID7", "ID9"] {
            assert!(
                xml.contains(&format!("\"#{}\"", id)),
                "missing reference to {}",
                id
            );
            assert!(
                xml.contains(&format!("id=\"{}\"", id)),
                "missing definition of {}",
                id
            );
        }
    }

    #[test]
    fn test_vertex_inputs() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        assert!(xml.contains("<input semantic=\"POSITION\" source=\"#ID7\"/>"));
        assert!(xml.contains("<input semantic=\"VERTEX\" source=\"#ID9\"/>"));
    }

    #[test]
    fn test_empty_mesh_still_structurally_valid() {
        let v = DMatrix::<f64>::zeros(0, 3);
        let f = DMatrix::<u32>::zeros(0, 3);
        let xml = xml_for(&v, &f);
        assert!(xml.contains("<float_array count=\"0\" id=\"ID10\"/>"));
        assert!(xml.contains("<accessor count=\"0\" source=\"#ID8\" stride=\"3\">"));
        assert!(xml.contains("<triangles count=\"0\">"));
        assert!(xml.contains("<p/>"));
    }

    #[test]
    fn test_float_formatting_round_trips() {
        let v = DMatrix::<f64>::from_row_slice(2, 3, &[0.1, -2.5, 1.0e-17, 123456.789, -0.0, 3.0]);
        let f = DMatrix::from_row_slice(1, 3, &[0u32, 1, 1]);
        let xml = xml_for(&v, &f);

        let start = xml.find("id=\"ID10\">").unwrap() + "id=\"ID10\">".len();
        let end = xml.find("</float_array>").unwrap();
        let tokens: Vec<f64> = xml[start..end]
            .split(' ')
            .map(|t| t.parse().unwrap())
            .collect();
        assert_eq!(tokens.len(), 6);
        for (written, original) in tokens.iter().zip(v.row_iter().flat_map(|r| {
            r.iter().cloned().collect::<Vec<_>>()
        })) {
            assert_eq!(written.to_bits(), original.to_bits());
        }
    }

    #[test]
    fn test_single_precision_input() {
        let v = DMatrix::from_row_slice(1, 3, &[0.1f32, 0.2, 0.3]);
        let f = DMatrix::from_row_slice(1, 3, &[0u32, 0, 0]);
        let xml = xml_for(&v, &f);
        // f32 Display is the shortest representation for that width
        assert!(xml.contains("<float_array count=\"3\" id=\"ID10\">0.1 0.2 0.3</float_array>"));
    }

    #[test]
    fn test_matrix_text_row_major() {
        let m = DMatrix::from_row_slice(2, 3, &[1u32, 2, 3, 4, 5, 6]);
        assert_eq!(matrix_text(&m), "1 2 3 4 5 6");
    }

    #[test]
    fn test_matrix_text_empty() {
        let m = DMatrix::<f64>::zeros(0, 3);
        assert_eq!(matrix_text(&m), "");
    }

    #[test]
    fn test_element_nesting_order() {
        let (v, f) = unit_square();
        let xml = xml_for(&v, &f);
        let asset = xml.find("<asset>").unwrap();
        let scenes = xml.find("<library_visual_scenes>").unwrap();
        let geometries = xml.find("<library_geometries>").unwrap();
        let scene = xml.find("<scene>").unwrap();
        assert!(asset < scenes && scenes < geometries && geometries < scene);
    }
}
