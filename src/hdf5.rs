//! Read / Write with hdf5
//!
//! Interface between ndarray and hdf5 for easier reading/writing
//! of scalars and multidimensional arrays.
pub use hdf5::H5Type;
pub use hdf5::Result;
use ndarray::{Array, Array1, ArrayBase, ArrayD, Dimension};
use std::path::Path;

/// Write dataset to hdf5 file. The file is created if it does not
/// exist, otherwise appended.
///
/// # Errors
/// Errors of the underlying hdf5 library
///
/// # Example
/// ```ignore
/// use kleingordon::hdf5::write_to_hdf5;
/// use ndarray::prelude::*;
/// let x = Array1::<f64>::zeros(6);
/// write_to_hdf5("test.h5", "x", None, &x).unwrap();
/// ```
pub fn write_to_hdf5<T, S, D>(
    filename: &str,
    name: &str,
    group: Option<&str>,
    array: &ArrayBase<S, D>,
) -> Result<()>
where
    T: H5Type + Copy,
    S: ndarray::Data<Elem = T>,
    D: Dimension,
{
    // Open file
    let file = if Path::new(filename).exists() {
        hdf5::File::append(filename)?
    } else {
        hdf5::File::create(filename)?
    };

    // Ensure group exists
    if let Some(g) = group {
        if !file.member_names()?.iter().any(|i| i == g) {
            file.create_group(g)?;
        }
    }

    // Write dataset
    let name_path = gen_name_path(name, group);
    let dset = if variable_exists(&file, name, group)? {
        file.dataset(&name_path)?
    } else {
        file.new_dataset::<T>()
            .no_chunk()
            .shape(array.shape())
            .create(&name_path[..])?
    };
    dset.write(&array.view())?;
    Ok(())
}

/// Write scalar to hdf5 file, stored as a dataset of size one.
///
/// # Errors
/// Errors of the underlying hdf5 library
pub fn write_scalar_to_hdf5<T>(
    filename: &str,
    name: &str,
    group: Option<&str>,
    scalar: T,
) -> Result<()>
where
    T: H5Type + Copy,
{
    let x = Array1::from_elem(1, scalar);
    write_to_hdf5(filename, name, group, &x)
}

/// Read dataset from hdf5 file, return array
///
/// # Errors
/// Errors when the file/variable does not exist.
///
/// # Panics
/// Panics when the dataset dimensionality does not match `D`.
pub fn read_from_hdf5<T, D>(
    filename: &str,
    name: &str,
    group: Option<&str>,
) -> Result<Array<T, D>>
where
    T: H5Type + Copy,
    D: Dimension,
{
    // Open file
    let file = hdf5::File::open(filename)?;

    // Read dataset
    let name_path = gen_name_path(name, group);
    let data = file.dataset(&name_path)?;
    let y: ArrayD<T> = data.read_dyn::<T>()?;

    // Dyn to static
    let x = y.into_dimensionality::<D>().unwrap();
    Ok(x)
}

/// Read dataset from hdf5 file into array
pub fn read_from_hdf5_into<T, S, D>(
    filename: &str,
    name: &str,
    group: Option<&str>,
    mut array: ArrayBase<S, D>,
) where
    T: H5Type + Copy,
    S: ndarray::Data<Elem = T> + ndarray::DataMut,
    D: Dimension,
{
    let result = read_from_hdf5::<T, D>(filename, name, group);
    match result {
        Ok(x) => array.assign(&x),
        Err(_) => println!("Error while reading file {:?}.", filename),
    }
}

/// Read scalar from hdf5 file
///
/// # Errors
/// Errors when the file/variable does not exist.
pub fn read_scalar_from_hdf5<T>(filename: &str, name: &str, group: Option<&str>) -> Result<T>
where
    T: H5Type + Copy,
{
    let x: Array1<T> = read_from_hdf5(filename, name, group)?;
    Ok(x[0])
}

/// Generate full variable path inside hdf5 file from name
/// of the variable and name of the group (optional)
fn gen_name_path(name: &str, group: Option<&str>) -> String {
    group.map_or_else(
        || name.to_owned(),
        |g| {
            if g.ends_with('/') {
                g.to_owned() + name
            } else {
                g.to_owned() + "/" + name
            }
        },
    )
}

/// Check if a variable exists in a hdf5 file
fn variable_exists(file: &hdf5::File, name: &str, group: Option<&str>) -> Result<bool> {
    if let Some(g) = group {
        if file
            .member_names()?
            .iter()
            .any(|i| i == g || i.to_owned() + "/" == g)
        {
            let group = file.group(g)?;
            Ok(group.member_names()?.iter().any(|i| i == name))
        } else {
            Ok(false)
        }
    } else {
        Ok(file.member_names()?.iter().any(|i| i == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_name_path() {
        assert_eq!(gen_name_path("v", None), "v");
        assert_eq!(gen_name_path("v", Some("u")), "u/v");
        assert_eq!(gen_name_path("v", Some("u/")), "u/v");
    }

    #[test]
    /// Read & Write 2-D data
    fn test_read_write() {
        let fname = std::env::temp_dir()
            .join("kleingordon_io.h5")
            .to_str()
            .unwrap()
            .to_owned();
        std::fs::remove_file(&fname).ok();

        let array = Array2::<f64>::from_elem((10, 10), 5.);
        write_to_hdf5(&fname, "var", None, &array).unwrap();
        // second write appends to the existing file
        write_to_hdf5(&fname, "v", Some("u"), &array).unwrap();
        write_scalar_to_hdf5(&fname, "time", None, 0.5).unwrap();

        let array_read: Array2<f64> = read_from_hdf5(&fname, "var", None).unwrap();
        assert_eq!(array, array_read);
        let group_read: Array2<f64> = read_from_hdf5(&fname, "v", Some("u")).unwrap();
        assert_eq!(array, group_read);
        let time: f64 = read_scalar_from_hdf5(&fname, "time", None).unwrap();
        assert!((time - 0.5).abs() < 1e-12);

        // overwrite in place keeps the dataset readable
        let array2 = Array2::<f64>::from_elem((10, 10), 2.);
        write_to_hdf5(&fname, "var", None, &array2).unwrap();
        let array_read: Array2<f64> = read_from_hdf5(&fname, "var", None).unwrap();
        assert_eq!(array2, array_read);

        std::fs::remove_file(&fname).ok();
    }
}
