//! Package metadata.

/// Package metadata shown by the installer and in Programs and Features.
///
/// # Examples
///
/// ```no_run
/// use octobuild_installer::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Octobuild".into(),
///     version: semver::Version::new(0, 1, 14),
///     manufacturer: "Artem V. Navrotskiy".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Also used, lowercased, as the stem of artifact file names.
    pub product_name: String,

    /// Product version read from the manifest.
    pub version: semver::Version,

    /// Brief description, stored in the package summary.
    pub description: String,

    /// Manufacturer (publisher) of the product.
    pub manufacturer: String,

    /// "About" link in Programs and Features (`ARPURLINFOABOUT`).
    ///
    /// Default: None
    pub url_info_about: Option<String>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            version: semver::Version::new(0, 0, 0),
            description: String::new(),
            manufacturer: String::new(),
            url_info_about: None,
        }
    }
}
