// src/zones.rs

/// Ordered (pattern, zone) pairs for Turin addresses. Patterns are lowercase
/// substrings matched against the lowercased address; the first hit wins, so
/// the more specific pattern must come before any pattern it contains
/// ("romania" before "roma", or Corso Romania would land in Centro).
const TURIN_ZONES: &[(&str, &str)] = &[
    ("romania", "Falchera"),
    ("falchera", "Falchera"),
    ("madonna del pilone", "Madonna del Pilone"),
    ("madonna di campagna", "Madonna di Campagna"),
    ("borgo vittoria", "Borgo Vittoria"),
    ("borgo san paolo", "Borgo San Paolo"),
    ("borgo po", "Borgo Po"),
    ("gran madre", "Borgo Po"),
    ("regio parco", "Regio Parco"),
    ("pozzo strada", "Pozzo Strada"),
    ("mirafiori", "Mirafiori"),
    ("unione sovietica", "Mirafiori Nord"),
    ("santa rita", "Santa Rita"),
    ("sebastopoli", "Santa Rita"),
    ("orbassano", "Santa Rita"),
    ("lingotto", "Lingotto"),
    ("millefonti", "Nizza Millefonti"),
    ("nizza", "Nizza Millefonti"),
    ("san salvario", "San Salvario"),
    ("madama cristina", "San Salvario"),
    ("crocetta", "Crocetta"),
    ("de gasperi", "Crocetta"),
    ("san donato", "San Donato"),
    ("campidoglio", "Campidoglio"),
    ("cit turin", "Cit Turin"),
    ("francia", "Cit Turin"),
    ("cenisia", "Cenisia"),
    ("parella", "Parella"),
    ("lucento", "Lucento"),
    ("vallette", "Vallette"),
    ("vanchiglietta", "Vanchiglietta"),
    ("vanchiglia", "Vanchiglia"),
    ("aurora", "Aurora"),
    ("giulio cesare", "Barriera di Milano"),
    ("barriera di milano", "Barriera di Milano"),
    ("rebaudengo", "Rebaudengo"),
    ("cavoretto", "Cavoretto"),
    ("sassi", "Sassi"),
    ("san carlo", "Centro"),
    ("castello", "Centro"),
    ("pietro micca", "Centro"),
    ("garibaldi", "Centro"),
    ("solferino", "Centro"),
    ("porta nuova", "Centro"),
    ("vittorio emanuele", "Centro"),
    ("roma", "Centro"),
];

/// Resolve a neighborhood label from a listing address.
///
/// The table is Turin-specific: any other city resolves to no label, and an
/// address matching no pattern resolves to no label. Neither case is an
/// error. Pure and deterministic.
pub fn resolve(city: &str, address: &str) -> Option<String> {
    if !city.trim().eq_ignore_ascii_case("torino") {
        return None;
    }

    let haystack = address.to_lowercase();
    TURIN_ZONES
        .iter()
        .find(|(pattern, _)| haystack.contains(pattern))
        .map(|(_, zone)| (*zone).to_string())
}
