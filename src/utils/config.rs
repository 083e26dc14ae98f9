//! Configuration defaults and constants shared across the crate.

/// Package name recorded for frames that live outside any dependency directory
pub const CURRENT_PACKAGE: &str = "[current]";

/// Directory name that marks the boundary into an installed dependency
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Token that introduces a call-site line in stack text
pub const CALL_SITE_MARKER: &str = "at ";

/// Marker that precedes a secondary position inside a compiled artifact
/// (e.g. `file.coffee:10:3, <js>:14:8`)
pub const COMPILED_MARKER: &str = ", <js>";

/// Call sites that carry no location at all and are dropped from the trace
pub const ANONYMOUS_CALL_SITES: &[&str] = &["Error (<anonymous>)", "Error (<anonymous>:null:null)"];

/// Default cap on the number of trace items handed to the renderer
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Default classification when an input carries none
pub const DEFAULT_KIND: &str = "Error";

/// Filenames of the runtime's built-in modules, skipped by `skip_node_files`
pub const NODE_MODULE_FILES: &[&str] = &[
    "_debugger.js",
    "_http_agent.js",
    "_http_client.js",
    "_http_common.js",
    "_http_incoming.js",
    "_http_outgoing.js",
    "_http_server.js",
    "_linklist.js",
    "_stream_duplex.js",
    "_stream_passthrough.js",
    "_stream_readable.js",
    "_stream_transform.js",
    "_stream_writable.js",
    "_tls_legacy.js",
    "_tls_wrap.js",
    "assert.js",
    "buffer.js",
    "child_process.js",
    "cluster.js",
    "console.js",
    "constants.js",
    "crypto.js",
    "dgram.js",
    "dns.js",
    "domain.js",
    "events.js",
    "freelist.js",
    "fs.js",
    "http.js",
    "https.js",
    "module.js",
    "net.js",
    "os.js",
    "path.js",
    "punycode.js",
    "querystring.js",
    "readline.js",
    "repl.js",
    "smalloc.js",
    "stream.js",
    "string_decoder.js",
    "sys.js",
    "timers.js",
    "tls.js",
    "tty.js",
    "url.js",
    "util.js",
    "vm.js",
    "zlib.js",
    "node.js",
];
