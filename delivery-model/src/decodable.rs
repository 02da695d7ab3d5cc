use crate::{DecodeContext, FieldsDecoder};
use delivery_types::{DecodeResult, Resource, Sys};

/// Implemented by caller-defined entry types.
///
/// Register implementors with a [`ContentTypeRegistry`](crate::ContentTypeRegistry)
/// so entries whose `sys.contentType` matches [`Self::CONTENT_TYPE_ID`] are
/// decoded into `Self` instead of the generic [`Entry`](crate::Entry).
///
/// Link fields are typically [`LinkSlot`](delivery_link::LinkSlot)s filled
/// at churn time:
///
/// ```ignore
/// struct Cat { sys: Sys, name: String, best_friend: LinkSlot<Cat> }
///
/// impl EntryDecodable for Cat {
///     const CONTENT_TYPE_ID: &'static str = "cat";
///
///     fn decode(sys: Sys, fields: &FieldsDecoder<'_>, ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
///         let best_friend = LinkSlot::new();
///         fields.resolve_link("bestFriend", ctx.resolver(), best_friend.callback())?;
///         Ok(Self { sys, name: fields.decode("name")?, best_friend })
///     }
/// }
/// ```
pub trait EntryDecodable: Resource + Sized {
    /// The content type id this type decodes.
    const CONTENT_TYPE_ID: &'static str;

    /// Builds `Self` from an entry's sys block and fields, registering any
    /// link fields with the session's resolver.
    fn decode(
        sys: Sys,
        fields: &FieldsDecoder<'_>,
        ctx: &mut DecodeContext<'_>,
    ) -> DecodeResult<Self>;
}
