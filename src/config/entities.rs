use crate::models::Entity;

/// Municipalities scored when the configuration file does not list its own
/// `entities`. Order matters: it is the iteration order used by rankings.
pub const DEFAULT_ENTITIES: &[(&str, &str)] = &[
    ("Maynard", "townofmaynard-ma.gov"),
    ("Medford", "medfordma.org"),
    ("Melrose", "cityofmelrose.org"),
    ("Merrimac", "merrimac01860.info"),
    ("Methuen", "cityofmethuen.net"),
    ("Middleton", "middletonma.gov"),
    ("Nahant", "nahant.org"),
    ("Newbury", "townofnewbury.org"),
    ("Newburyport", "cityofnewburyport.com"),
    ("Newton", "newtonma.gov"),
    ("North Andover", "northandoverma.gov"),
    ("North Reading", "northreadingma.gov"),
    ("Peabody", "peabody-ma.gov"),
    ("Pepperell", "town.pepperell.ma.us"),
    ("Reading", "readingma.gov"),
    ("Rockport", "rockportma.gov"),
    ("Rowley", "townofrowley.org"),
    ("Salem", "salemma.gov"),
    ("Salisbury", "salisburyma.gov"),
    ("Saugus", "saugus-ma.gov"),
    ("Sherborn", "sherbornma.org"),
    ("Shirley", "shirley-ma.gov"),
    ("Stoneham", "stoneham-ma.gov"),
    ("Stow", "stow-ma.gov"),
    ("Sudbury", "sudbury.ma.us"),
    ("Swampscott", "swampscottma.gov"),
    ("Tewksbury", "tewksbury-ma.gov"),
    ("Topsfield", "topsfield-ma.gov"),
    ("Townsend", "townsend.ma.us"),
    ("Tyngsborough", "tyngsboroughma.gov"),
    ("Wakefield", "wakefield.ma.us"),
    ("Watertown", "watertown-ma.gov"),
    ("Wayland", "wayland.ma.us"),
    ("Westford", "westfordma.gov"),
    ("Weston", "weston.org"),
    ("Wilmington", "wilmingtonma.gov"),
    ("Winchester", "winchester.us"),
    ("Woburn", "cityofwoburn.com"),
    ("Georgetown", "georgetownma.gov"),
    ("Gloucester", "gloucester-ma.gov"),
    ("Groveland", "grovelandma.com"),
    ("Hamilton", "hamiltonma.gov"),
    ("Haverhill", "cityofhaverhill.com"),
    ("Groton", "townofgroton.org"),
    ("Ipswich", "ipswichma.gov"),
    ("Lawrence", "cityoflawrence.com"),
    ("Lexington", "lexingtonma.gov"),
    ("Littleton", "littletonma.org"),
    ("Lynn", "lynnma.gov"),
    ("Lynnfield", "town.lynnfield.ma.us"),
    ("Malden", "cityofmalden.org"),
    ("Manchester", "manchester.ma.us"),
    ("Marblehead", "marblehead.org"),
    ("Marlborough", "marlborough-ma.gov"),
    ("Acton", "acton-ma.gov"),
    ("Amesbury", "amesburyma.gov"),
    ("Andover", "andoverma.gov"),
    ("Arlington", "arlingtonma.gov"),
    ("Ayer", "ayer.ma.us"),
    ("Bedford", "bedfordma.gov"),
    ("Belmont", "belmont-ma.gov"),
    ("Billerica", "town.billerica.ma.us"),
    ("Beverly", "beverlyma.gov"),
    ("Boxborough", "boxborough-ma.gov"),
    ("Burlington", "burlington.org"),
    ("Chelmsford", "chelmsfordma.gov"),
    ("Concord", "concordma.gov"),
    ("Danvers", "danversma.gov"),
    ("Dracut", "dracutma.gov"),
    ("Dunstable", "dunstable-ma.gov"),
    ("Essex", "essexma.org"),
    ("Framingham", "framinghamma.gov"),
    ("Holliston", "townofholliston.us"),
    ("Hopkinton", "hopkintonma.gov"),
    ("Lowell", "lowellma.gov"),
];

pub fn default_entities() -> Vec<Entity> {
    DEFAULT_ENTITIES
        .iter()
        .map(|(name, domain)| Entity::new(name, domain))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_entity_names_are_unique() {
        let names: HashSet<&str> = DEFAULT_ENTITIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), DEFAULT_ENTITIES.len());
    }

    #[test]
    fn test_default_entities_preserve_order() {
        let entities = default_entities();
        assert_eq!(entities[0].name, "Maynard");
        assert_eq!(entities[0].domain, "townofmaynard-ma.gov");
    }
}
