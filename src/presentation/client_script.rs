// Client-side script embedded into every rendered page.
//
// The target devices are e-reader browsers with ancient JavaScript engines,
// so the script sticks to ES5. It is the on-device half of the staleness
// state machine modeled in domain::staleness and reads its thresholds from
// the `window.glucopanelConfig` object the page embeds at render time:
// STANDARD_CGM_UPDATE_INTERVAL and DATA_MISSING_TOO_LONG, both in seconds.
//
// Responsibilities:
// - track the true data age from the timestamp baked into the page
// - reload the page adaptively when the data goes stale
// - re-render all timestamps in the viewer's local time zone
// - toggle the debug log

pub const CLIENT_SIDE_SCRIPT: &str = r#"
(function () {
  var loadTime = new Date()

  document.getElementById('log-toggler').onclick = function () {
    var element = document.getElementById('log')
    element.style.display = element.style.display === 'none' ? 'block' : 'none'
  }

  function log(text) {
    var element = document.getElementById('log')
    if (element) {
      element.innerHTML = text
    }
  }

  function reload() {
    log('reloading at ' + (new Date()))
    window.location.reload()
  }

  // Update the data age client-side so it stays truthful even when the
  // server is unreachable. Adaptive refresh: no point reloading constantly
  // when the CGM only updates once every few minutes.
  function updateTrueDataAgeAndPotentiallyRefresh() {
    var element = document.getElementById('measurement-age')
    if (element === null) {
      // No data on the page. Just retry once a minute.
      if (new Date() - loadTime > 60000) {
        reload()
      }
      return
    }
    var time = new Date(Number(element.getAttribute('data-time')))
    var ageInSeconds = (new Date() - time) / 1000

    if (ageInSeconds > window.glucopanelConfig.STANDARD_CGM_UPDATE_INTERVAL) {
      // Missing for less than DATA_MISSING_TOO_LONG seconds: assume a
      // transient failure and refresh aggressively. Missing for longer
      // (e.g. a new sensor warming up): refresh only once a minute to
      // conserve the device battery.
      var refreshInterval = ageInSeconds < window.glucopanelConfig.DATA_MISSING_TOO_LONG ? 20 : 60
      if (new Date() - loadTime > refreshInterval * 1000) {
        reload()
      }
    }

    // Stale styling is driven by data age alone.
    document.body.className = (ageInSeconds >= window.glucopanelConfig.DATA_MISSING_TOO_LONG) ? 'stale-data' : ''

    var ageInMinutes = Math.round(ageInSeconds / 60)
    var text = 'current'
    if (ageInMinutes > 0) {
      text = [
        String(ageInMinutes),
        ageInMinutes === 1 ? 'min' : 'mins',
        'ago'
      ].join(' ')
    }
    element.innerText = text
  }
  updateTrueDataAgeAndPotentiallyRefresh()
  window.setInterval(updateTrueDataAgeAndPotentiallyRefresh, 20000)

  // Format all times client-side so they appear in the viewer's time zone.
  function pad(x) {
    return (x < 10 ? '0' : '') + x.toString()
  }
  function formatTimes() {
    var element, time
    var times = document.getElementsByClassName('time')
    for (var i = 0; i < times.length; i++) {
      element = times.item(i)
      time = new Date(Number(element.getAttribute('data-time')))
      element.innerText = pad(time.getHours()) + ':' + pad(time.getMinutes())
    }
  }
  formatTimes()
})()
"#;
