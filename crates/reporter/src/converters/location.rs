use super::{ClientLocation, LocationConverter, SourceShaper};
use crate::error::Result;
use crate::model::Location;

/// Default [`LocationConverter`].
///
/// Path sources are not checked against the disk here (that would need to
/// suspend); they carry a `sourceReference` only if the source converter has
/// already minted one for them.
#[derive(Debug, Clone)]
pub struct ClientLocationConverter {
    shaper: SourceShaper,
}

impl ClientLocationConverter {
    pub fn new(shaper: SourceShaper) -> Self {
        Self { shaper }
    }
}

impl LocationConverter for ClientLocationConverter {
    fn apply<T: ClientLocation>(&self, location: &Location, target: &mut T) -> Result<()> {
        // resolve everything before touching the target, so a failure leaves it as it was
        let (line, column) = self
            .shaper
            .client()
            .to_client_position(location.line, location.column)?;
        let source = self.shaper.shape(&location.source, None)?;

        target.set_source(source);
        target.set_position(line, column);
        Ok(())
    }
}
