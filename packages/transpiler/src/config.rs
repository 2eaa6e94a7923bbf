//! Configuration constants for the transpiler.

/// Known VASKI namespace prefixes and URIs.
///
/// Documents in the Vaski repository qualify every element with one of
/// these namespaces. The transpiler dispatches on local names only, but the
/// table is used to annotate errors with the conventional prefix so that an
/// unrecognized `<sis1:...>` element is reported the way the schema
/// documentation spells it.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("asi", "http://www.vn.fi/skeemat/asiakirjakooste/2010/04/27"),
    ("asi1", "http://www.vn.fi/skeemat/asiakirjaelementit/2010/04/27"),
    ("met", "http://www.vn.fi/skeemat/metatietokooste/2010/04/27"),
    ("met1", "http://www.vn.fi/skeemat/metatietoelementit/2010/04/27"),
    ("org", "http://www.vn.fi/skeemat/organisaatiokooste/2010/02/15"),
    ("org1", "http://www.vn.fi/skeemat/organisaatioelementit/2010/02/15"),
    ("sis", "http://www.vn.fi/skeemat/sisaltokooste/2010/04/27"),
    ("sis1", "http://www.vn.fi/skeemat/sisaltoelementit/2010/04/27"),
    ("saa", "http://www.vn.fi/skeemat/saadoskooste/2010/04/27"),
    ("saa1", "http://www.vn.fi/skeemat/saadoselementit/2010/04/27"),
    ("tau", "http://www.vn.fi/skeemat/taulukkokooste/2010/04/27"),
    ("he", "http://www.vn.fi/skeemat/he/2010/04/27"),
    ("vml", "http://www.eduskunta.fi/skeemat/mietinto/2011/01/04"),
    ("vsk", "http://www.eduskunta.fi/skeemat/vaskikooste/2011/01/04"),
    ("vsk1", "http://www.eduskunta.fi/skeemat/vaskielementit/2011/01/04"),
    ("vas", "http://www.eduskunta.fi/skeemat/vastalause/2011/01/04"),
    ("jme", "http://www.eduskunta.fi/skeemat/julkaisusiirtokooste/2011/12/20"),
    ("sii", "http://www.eduskunta.fi/skeemat/siirtokooste/2011/05/17"),
    ("sii1", "http://www.eduskunta.fi/skeemat/siirtoelementit/2011/05/17"),
    ("sta", "http://www.eduskunta.fi/skeemat/siirto/2011/09/07"),
];

/// Look up the conventional prefix for a namespace URI.
#[must_use]
pub fn namespace_prefix(uri: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(_, known)| *known == uri)
        .map(|(prefix, _)| *prefix)
}

/// Text wrap width for Markdown output.
pub const TEXT_WRAP_WIDTH: usize = 100;
