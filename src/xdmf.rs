//! Create xmf files from hdf5 checkpoints for paraview
//!
//! The periodic grid is equispaced, so the geometry is fully
//! described by origin and spacing (3DCoRectMesh) and no separate
//! coordinate file is needed.
use std::fs::File;
use std::io::LineWriter;
use std::io::Write;
use std::path::PathBuf;

/// Create xmf file from hdf5 file for paraview
#[derive(Debug)]
pub struct XdmfWriter {
    /// Number of points per axis
    shape: [usize; 3],
    /// Left domain edges
    origin: [f64; 3],
    /// Grid spacings
    spacing: [f64; 3],
}

impl XdmfWriter {
    /// Return xdmfwriter from grid shape, origin and spacing
    #[must_use]
    pub fn new(shape: [usize; 3], origin: [f64; 3], spacing: [f64; 3]) -> Self {
        Self {
            shape,
            origin,
            spacing,
        }
    }

    /// Return string, which defines the geometry attributes
    ///
    /// Xdmf lists dimensions and ORIGIN_DXDYDZ values slowest axis
    /// first (its Z slot). Axis 0 of the row-major datasets is the
    /// slowest, so shape, origin and spacing go out in index order.
    fn geometry_string(&self) -> String {
        let mut string = String::from("<Geometry GeometryType=\"ORIGIN_DXDYDZ\">\n");
        string += &format!(
            "<DataItem Dimensions=\"3\" Format=\"XML\">{:12.8}{:12.8}{:12.8}</DataItem>\n",
            self.origin[0], self.origin[1], self.origin[2]
        );
        string += &format!(
            "<DataItem Dimensions=\"3\" Format=\"XML\">{:12.8}{:12.8}{:12.8}</DataItem>\n",
            self.spacing[0], self.spacing[1], self.spacing[2]
        );
        string += "</Geometry>\n";
        string
    }

    /// Return string, which defines the data attributes
    fn data_string(&self, fname: &str, aname: &str, vname: &str) -> String {
        let mut string = format!(
            "<Attribute Name=\"{}\" AttributeType=\"Scalar\" Center=\"Node\">\n",
            aname
        );
        string += &format!("<DataItem Dimensions=\"{:6}{:6}{:6}\" NumberType=\"Float\" Precision=\"8\" Format=\"HDF\">{}:/{}</DataItem>\n",
            self.shape[0], self.shape[1], self.shape[2], fname, vname);
        string += "</Attribute>\n";
        string
    }

    /// Assemble the xmf document for one hdf5 file.
    ///
    /// `names` holds (attribute name, dataset path) pairs, e.g.
    /// `("u", "u/v")`.
    #[must_use]
    pub fn build(&self, fname: &str, names: &[(&str, &str)], time: f64) -> String {
        // Strip directory from fname, xmf lives next to it
        let path = PathBuf::from(fname);
        let fname = path
            .file_name()
            .and_then(|x| x.to_str())
            .unwrap_or("default.h5");

        let mut string = String::from("<?xml version=\"1.0\" ?>\n");
        string += "<!DOCTYPE Xdmf SYSTEM \"Xdmf.dtd\" []>\n";
        string += "<Xdmf Version=\"2.0\">\n";
        string += "<Domain>\n";
        string += "<Grid Name=\"Box\" GridType=\"Uniform\">\n";
        string += &format!(
            "<Topology TopologyType=\"3DCoRectMesh\" NumberOfElements=\"{:6}{:6}{:6}\"/>\n",
            self.shape[0], self.shape[1], self.shape[2]
        );
        string += &self.geometry_string();
        for (aname, vname) in names {
            string += &self.data_string(fname, aname, vname);
        }
        string += &format!("<Time Value=\" {:12.10}\" />\n", time);
        string += "</Grid>\n";
        string += "</Domain>\n";
        string += "</Xdmf>\n";
        string
    }

    /// Write xdmf file, belongs to hdf5 file (filename)
    ///
    /// # Errors
    /// IO errors of the filesystem
    pub fn write(&self, fname: &str, names: &[(&str, &str)], time: f64) -> std::io::Result<()> {
        // Get xmf name from filename
        let xmfname = if fname.ends_with(".h5") {
            fname.replace(".h5", ".xmf")
        } else {
            println!(
                "Warning! File {:?} doesnt end with \".h5\", used \"default.xmf\" instead",
                fname
            );
            String::from("default.xmf")
        };

        let file = File::create(&xmfname)?;
        let mut file = LineWriter::new(file);
        file.write_all(self.build(fname, names, time).as_bytes())?;
        Ok(())
    }
}
