use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::{error, fmt, fs};

use tracing::debug;

use crate::schema::{self, Package};
use crate::templates;

/// Name of the generated source file within each package directory.
const FILE_NAME: &str = "Colfer.go";

/// Code generation errors
#[derive(Debug)]
pub enum Error {
    /// Package directory creation failed
    MakeDir(PathBuf, io::Error),
    /// Output file creation failed
    CreateFile(PathBuf, io::Error),
    /// Emission into an already created file failed; the partial file is
    /// left in place
    WriteFile(PathBuf, io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MakeDir(path, err) => {
                write!(f, "cannot create package directory {}: {err}", path.display())
            }
            Self::CreateFile(path, err) => write!(f, "cannot create {}: {err}", path.display()),
            Self::WriteFile(path, err) => write!(f, "write {} aborted: {err}", path.display()),
        }
    }
}

impl error::Error for Error {}

/// Writes the code for each package into file "Colfer.go".
///
/// The schema is decorated first (see [`schema::decorate`]), then the
/// packages are processed in the order given: the package directory is
/// derived from the `/`-separated package name under `basedir`, created
/// together with its ancestors, and the source file is written into it.
/// Output is deterministic; identical input yields byte-identical files.
///
/// Processing stops at the first failure. Files written for earlier
/// packages are not rolled back, and a file whose emission failed midway
/// remains truncated; regenerate from a clean base directory after any
/// error.
pub fn generate(basedir: &Path, packages: &mut [Package]) -> Result<(), Error> {
    schema::decorate(packages);

    for p in packages.iter() {
        let dir = pkg_dir(basedir, p);
        fs::create_dir_all(&dir).map_err(|err| Error::MakeDir(dir.clone(), err))?;

        let path = dir.join(FILE_NAME);
        let file = File::create(&path).map_err(|err| Error::CreateFile(path.clone(), err))?;
        let mut w = BufWriter::new(file);
        templates::package_file(&mut w, p)
            .and_then(|()| w.flush())
            .map_err(|err| Error::WriteFile(path.clone(), err))?;

        debug!(package = p.name.as_str(), file = %path.display(), "generated");
    }
    Ok(())
}

/// Output directory for a package: `basedir` joined with the package name,
/// one path component per `/`-separated segment.
fn pkg_dir(basedir: &Path, p: &Package) -> PathBuf {
    let mut dir = basedir.to_path_buf();
    for segment in p.name.split('/') {
        dir.push(segment);
    }
    dir
}

#[test]
fn test_pkg_dir_layout() {
    let p = Package {
        name: "demo/api".to_string(),
        name_native: String::new(),
        structs: Vec::new(),
    };
    assert_eq!(
        Path::new("out").join("demo").join("api"),
        pkg_dir(Path::new("out"), &p)
    );

    let flat = Package {
        name: "common".to_string(),
        name_native: String::new(),
        structs: Vec::new(),
    };
    assert_eq!(Path::new("out").join("common"), pkg_dir(Path::new("out"), &flat));
}
