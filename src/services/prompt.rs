//! Prompt sent to the code generation service

use indoc::formatdoc;

use crate::timer::{Rgb, TimerConfig};

/// Plugin identity baked into the generated source
pub const PLUGIN_NAME: &str = "ProgressiveTimer";
pub const PLUGIN_ID: &str = "MZN1";

/// Color as a GL float quadruple, e.g. `{ 1.00f, 0.50f, 0.00f, 1.0f }`
pub fn gl_color(color: Rgb) -> String {
    let [r, g, b] = color.to_unit();
    format!("{{ {:.2}f, {:.2}f, {:.2}f, 1.0f }}", r, g, b)
}

/// Build the plugin-generation prompt for a config snapshot.
pub fn build_prompt(config: &TimerConfig) -> String {
    let limit = config.limit_seconds;
    let message = config.final_message.replace('"', "\\\"");

    formatdoc! {r##"
        You are an expert C++ developer specializing in FFGL (FreeFrame GL) plugins for Resolume Arena.

        **GOAL:** Generate a robust, cross-platform (Windows & macOS) C++ source file for a Timer Plugin.

        **CONTEXT:**
        The user is following the official Resolume FFGL SDK "Quickstart" guide. They will paste this code into a file inside an existing SDK project (replacing a sample plugin).

        **REQUIREMENTS:**
        1.  **Single File**: Provide the complete implementation (Class definition + Methods + DLL Exports) in one code block.
        2.  **SDK Compliance**:
            - Include <FFGL.h> and <FFGLLib.h>.
            - Use the standard `CFFGLPlugin` base class.
            - Implement `DllMain` (Windows) and `plugMain`.
        3.  **Rendering (Vector)**:
            - **DO NOT** use external font libraries (FreeType, etc.).
            - Implement a private helper method `DrawDigit(float x, float y, float size, char character)` using `glBegin(GL_LINES)` to draw numbers 0-9 and letters A-Z (for the message).
            - **DO NOT** draw any copyright/version footer text on the texture itself.
        4.  **Cross-Platform**:
            - Use standard OpenGL 2.1 syntax (compatible with Resolume).
            - If including Windows headers, wrap them in `#ifdef _WIN32`.

        **PLUGIN LOGIC:**
        - **Name**: "{name}"
        - **ID**: "{id}"
        - **Function**: Count UP from 0 to {limit}s.
        - **Parameters (Controls)**:
          - `Play` (Checkbox/Bool): Default ON. If OFF, pause timer.
          - `Reset` (Event/Trigger): If triggered, set time to 0.
        - **Visuals**:
          - Draw the time (MM:SS).
          - If Limit reached ({limit}s), draw message: "{message}".{blink}
        - **Colors**:
          - Default: {default}
          - <= 30s remaining: {c30}
          - <= 15s remaining: {c15}
          - <= 10s remaining: {c10}
          - <= 5s remaining: {c5}

        **OUTPUT FORMAT:**
        Return ONLY the raw C++ code string. No markdown formatting blocks around it, or minimal markdown.

        ```cpp
        #include <FFGL.h>
        #include <FFGLLib.h>

        #ifdef _WIN32
        #include <windows.h>
        #endif

        #include <stdio.h>
        #include <math.h>
        #include <string>

        // Define ID
        #define MIZIN_PLUGIN_ID "{id}"

        class {name} : public CFFGLPlugin {{
        public:
           {name}();
           // ... overrides ...
        private:
           // ... helpers ...
           void DrawChar(float x, float y, float size, char c);
           void DrawString(float x, float y, float size, const char* str);

           // Param constants
           // #define FFPARAM_PLAY  0
           // #define FFPARAM_RESET 1
        }};

        // ... Implementation ...
        ```
        "##,
        name = PLUGIN_NAME,
        id = PLUGIN_ID,
        limit = limit,
        message = message,
        blink = if config.final_message_blink {
            "\n  - Blink the message on and off every 0.5s while the timer is playing."
        } else {
            ""
        },
        default = gl_color(config.color_default),
        c30 = gl_color(config.color_30s),
        c15 = gl_color(config.color_15s),
        c10 = gl_color(config.color_10s),
        c5 = gl_color(config.color_5s),
    }
}
