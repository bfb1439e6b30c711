//! Built-in DMAP, DAAP and DACP tag table.

use crate::scalar::ScalarKind;
use crate::value::ValueKind;

const UBYTE: ValueKind = ValueKind::Scalar(ScalarKind::UByte);
const BYTE: ValueKind = ValueKind::Scalar(ScalarKind::Byte);
const USHORT: ValueKind = ValueKind::Scalar(ScalarKind::UShort);
const SHORT: ValueKind = ValueKind::Scalar(ScalarKind::Short);
const UINT: ValueKind = ValueKind::Scalar(ScalarKind::UInt);
const INT: ValueKind = ValueKind::Scalar(ScalarKind::Int);
const ULONG: ValueKind = ValueKind::Scalar(ScalarKind::ULong);
const MULTI_UINT: ValueKind = ValueKind::Multi(ScalarKind::UInt);
const DATE: ValueKind = ValueKind::Timestamp;
const VERSION: ValueKind = ValueKind::Version;
const STRING: ValueKind = ValueKind::Text;
const BINARY: ValueKind = ValueKind::Binary;
const CONTAINER: ValueKind = ValueKind::Container;

/// `(tag, display name, kind)` for every tag `TagRegistry::standard` knows.
pub static STANDARD_TAGS: &[(&[u8; 4], &str, ValueKind)] = &[
    // dmap
    (b"mstt", "dmap.status", UINT),
    (b"msts", "dmap.statusstring", STRING),
    (b"mimc", "dmap.itemcount", UINT),
    (b"mctc", "dmap.containercount", UINT),
    (b"mrco", "dmap.returnedcount", UINT),
    (b"mtco", "dmap.specifiedtotalcount", UINT),
    (b"mlcl", "dmap.listing", CONTAINER),
    (b"mlit", "dmap.listingitem", CONTAINER),
    (b"mbcl", "dmap.bag", CONTAINER),
    (b"mdcl", "dmap.dictionary", CONTAINER),
    (b"miid", "dmap.itemid", UINT),
    (b"mikd", "dmap.itemkind", UBYTE),
    (b"mper", "dmap.persistentid", ULONG),
    (b"mcon", "dmap.container", CONTAINER),
    (b"mcti", "dmap.containeritemid", UINT),
    (b"mpco", "dmap.parentcontainerid", UINT),
    (b"minm", "dmap.itemname", STRING),
    (b"msrv", "dmap.serverinforesponse", CONTAINER),
    (b"mpro", "dmap.protocolversion", VERSION),
    (b"musr", "dmap.serverrevision", UINT),
    (b"msed", "dmap.supportsedit", UBYTE),
    (b"msml", "dmap.speakermachinelist", CONTAINER),
    (b"msma", "dmap.speakermachineaddress", ULONG),
    (b"msau", "dmap.authenticationmethod", UBYTE),
    (b"msas", "dmap.authenticationschemes", UINT),
    (b"mslr", "dmap.loginrequired", UBYTE),
    (b"mstm", "dmap.timeoutinterval", UINT),
    (b"mstc", "dmap.utctime", DATE),
    (b"msto", "dmap.utcoffset", INT),
    (b"msal", "dmap.supportsautologout", UBYTE),
    (b"msup", "dmap.supportsupdate", UBYTE),
    (b"mspi", "dmap.supportspersistentids", UBYTE),
    (b"msex", "dmap.supportsextensions", UBYTE),
    (b"msbr", "dmap.supportsbrowse", UBYTE),
    (b"msqy", "dmap.supportsquery", UBYTE),
    (b"msix", "dmap.supportsindex", UBYTE),
    (b"msrs", "dmap.supportsresolve", UBYTE),
    (b"msdc", "dmap.databasescount", UINT),
    (b"mlog", "dmap.loginresponse", CONTAINER),
    (b"mlid", "dmap.sessionid", UINT),
    (b"mupd", "dmap.updateresponse", CONTAINER),
    (b"muty", "dmap.updatetype", UBYTE),
    (b"mudl", "dmap.deletedidlisting", CONTAINER),
    (b"mccr", "dmap.contentcodesresponse", CONTAINER),
    (b"mcnm", "dmap.contentcodesnumber", UINT),
    (b"mcna", "dmap.contentcodesname", STRING),
    (b"mcty", "dmap.contentcodestype", USHORT),
    (b"meds", "dmap.editcommandssupported", UINT),
    (b"mshl", "dmap.sortingheaderlisting", CONTAINER),
    (b"mshc", "dmap.sortingheaderchar", USHORT),
    (b"mshi", "dmap.sortingheaderindex", UINT),
    (b"mshn", "dmap.sortingheadernumber", UINT),
    // daap
    (b"apro", "daap.protocolversion", VERSION),
    (b"avdb", "daap.serverdatabases", CONTAINER),
    (b"abro", "daap.databasebrowse", CONTAINER),
    (b"abal", "daap.browsealbumlisting", CONTAINER),
    (b"abar", "daap.browseartistlisting", CONTAINER),
    (b"abcp", "daap.browsecomposerlisting", CONTAINER),
    (b"abgn", "daap.browsegenrelisting", CONTAINER),
    (b"adbs", "daap.databasesongs", CONTAINER),
    (b"aply", "daap.databaseplaylists", CONTAINER),
    (b"apso", "daap.playlistsongs", CONTAINER),
    (b"arsv", "daap.resolve", CONTAINER),
    (b"arif", "daap.resolveinfo", CONTAINER),
    (b"abpl", "daap.baseplaylist", UBYTE),
    (b"aeSP", "com.apple.itunes.smart-playlist", UBYTE),
    (b"aePS", "com.apple.itunes.special-playlist", UBYTE),
    (b"asal", "daap.songalbum", STRING),
    (b"asaa", "daap.songalbumartist", STRING),
    (b"asai", "daap.songalbumid", ULONG),
    (b"asar", "daap.songartist", STRING),
    (b"asbr", "daap.songbitrate", USHORT),
    (b"ascm", "daap.songcomment", STRING),
    (b"asco", "daap.songcompilation", UBYTE),
    (b"ascp", "daap.songcomposer", STRING),
    (b"asda", "daap.songdateadded", DATE),
    (b"asdm", "daap.songdatemodified", DATE),
    (b"asdc", "daap.songdisccount", USHORT),
    (b"asdn", "daap.songdiscnumber", USHORT),
    (b"asdk", "daap.songdatakind", UBYTE),
    (b"aseq", "daap.songeqpreset", STRING),
    (b"asfm", "daap.songformat", STRING),
    (b"asgn", "daap.songgenre", STRING),
    (b"asdt", "daap.songdescription", STRING),
    (b"asrv", "daap.songrelativevolume", BYTE),
    (b"assr", "daap.songsamplerate", UINT),
    (b"assz", "daap.songsize", UINT),
    (b"asst", "daap.songstarttime", UINT),
    (b"assp", "daap.songstoptime", UINT),
    (b"astm", "daap.songtime", UINT),
    (b"astc", "daap.songtrackcount", USHORT),
    (b"astn", "daap.songtracknumber", USHORT),
    (b"asur", "daap.songuserrating", UBYTE),
    (b"asyr", "daap.songyear", USHORT),
    (b"asul", "daap.songdataurl", STRING),
    (b"asbt", "daap.songbeatsperminute", USHORT),
    (b"agrp", "daap.songgrouping", STRING),
    (b"aeNV", "com.apple.itunes.norm-volume", UINT),
    (b"aeSV", "com.apple.itunes.music-sharing-version", UINT),
    (b"aeHV", "com.apple.itunes.has-video", UBYTE),
    (b"aeMK", "com.apple.itunes.mediakind", UBYTE),
    (b"aeSI", "com.apple.itunes.itms-songid", UINT),
    (b"aeFP", "com.apple.itunes.req-fplay", UBYTE),
    // dacp
    (b"cmpa", "dacp.pairinganswer", CONTAINER),
    (b"cmpg", "dacp.pairingguid", ULONG),
    (b"cmnm", "dacp.devicename", STRING),
    (b"cmty", "dacp.devicetype", STRING),
    (b"cmgt", "dacp.getspeakers", CONTAINER),
    (b"cmst", "dacp.playstatus", CONTAINER),
    (b"cmsr", "dacp.serverrevision", UINT),
    (b"cmvo", "dacp.volume", UINT),
    (b"cmmk", "dacp.mediakind", UINT),
    (b"caps", "dacp.playerstate", UBYTE),
    (b"cash", "dacp.shufflestate", UBYTE),
    (b"carp", "dacp.repeatstate", UBYTE),
    (b"cavc", "dacp.volumecontrollable", UBYTE),
    (b"caas", "dacp.albumshuffle", UINT),
    (b"caar", "dacp.albumrepeat", UINT),
    (b"cann", "dacp.nowplayingtrack", STRING),
    (b"cana", "dacp.nowplayingartist", STRING),
    (b"canl", "dacp.nowplayingalbum", STRING),
    (b"cang", "dacp.nowplayinggenre", STRING),
    (b"canp", "dacp.nowplaying", MULTI_UINT),
    (b"cant", "dacp.remainingtime", UINT),
    (b"cast", "dacp.tracklength", UINT),
    (b"casp", "dacp.speakers", CONTAINER),
    (b"caia", "dacp.isactive", UBYTE),
    (b"caci", "dacp.controlint", CONTAINER),
    (b"cmcp", "dacp.controlprompt", CONTAINER),
    (b"cmik", "dacp.unknownik", UBYTE),
    (b"cmsp", "dacp.unknownsp", UBYTE),
    (b"cmsv", "dacp.unknownsv", UBYTE),
    (b"cmpr", "dacp.protocolversion", VERSION),
    (b"capr", "dacp.controlprotocolversion", VERSION),
    (b"cafs", "dacp.fullscreen", UBYTE),
    (b"cavs", "dacp.visualizer", UBYTE),
    (b"cafe", "dacp.fullscreenenabled", UBYTE),
    (b"cave", "dacp.visualizerenabled", UBYTE),
    (b"ceQR", "com.apple.itunes.playqueue-contents-response", CONTAINER),
    (b"ceWM", "", BINARY),
    (b"ceVO", "", UBYTE),
    (b"ceSD", "", BINARY),
    (b"ceJV", "", UINT),
    (b"ceJC", "", UBYTE),
    (b"ceJS", "", SHORT),
];
