//! Constants that are shared between the crates in this workspace.
//! Crate-specific constants should go in their respective crates.

/// Version tag written into share transfer objects and configurations.
pub const FORMAT_VERSION: u32 = 1;

/// Default RSA key size for newly created secrets.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Default RSA public exponent for newly created secrets.
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Bytes appended to the serialized private exponent: a 4-byte CRC32 and a
/// one-byte sentinel.
pub const KEY_FRAMING_BYTES: usize = 5;

/// Default prime modulus of the sharing field, in decimal.
///
/// This is a 4224-bit prime. A 4096-bit private exponent plus
/// [`KEY_FRAMING_BYTES`] needs at most 4136 bits.
pub const DEFAULT_MODULUS: &str = concat!(
    "2889319989747198508017897377754761759953328277718754812082417603477570842702413950136716111",
    "4253125522907640180566965220783523146817894334026799437526739377193559559759889067003401856",
    "2124498386860955753009768466817083708333848035385454268746020077331016479520447589046833952",
    "2468447831807449528626388788175819759513387131120380099136954031597223791057532693555922087",
    "7080849132050876432134809102256797707118419261526971400407236775453157270483476375406065843",
    "5319702302382464271892705571752173635918220535458342355913957812656303041229955422952783952",
    "0253165732173318673267943281002269301242411985438368757907751355332784816919907385242939906",
    "9177591601361748211345865728344666332255374851560507057003634209145392689495403329031170379",
    "1014981854500023650703167852063741648305428020847503987261709990908729830410603464119293967",
    "7228304604770738512134171769815854161435373798859091868613291882864749563180319597248091170",
    "2085579557384687374818316304547016994826324567709075147295589914766965537838037352562465293",
    "5744425590033704088141455053437189109095709767466367466947490692741916306743994840604477651",
    "0821456681379928554673026860125006056160091726631821837704458773169723051070221270445735400",
    "48557191607576051060248378262129303185824081872165173389833458016853826300737741498501823",
);

