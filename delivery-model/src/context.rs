use crate::ContentTypeRegistry;
use delivery_link::LinkResolver;
use delivery_types::LocalizationContext;

/// The collaborators a decode session needs, passed explicitly down the
/// decode call chain.
pub struct DecodeContext<'a> {
    pub localization: &'a LocalizationContext,
    pub registry: &'a ContentTypeRegistry,
    pub resolver: &'a mut LinkResolver,
}

impl<'a> DecodeContext<'a> {
    pub fn new(
        localization: &'a LocalizationContext,
        registry: &'a ContentTypeRegistry,
        resolver: &'a mut LinkResolver,
    ) -> Self {
        Self {
            localization,
            registry,
            resolver,
        }
    }

    /// The session's link resolver.
    pub fn resolver(&mut self) -> &mut LinkResolver {
        self.resolver
    }
}
